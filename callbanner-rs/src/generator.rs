//! The banner generator session: one render at a time, keeping the last
//! successful image for export.

use crate::compositor::{compose, ButtonIcons};
use crate::config::BannerConfig;
use crate::error::BannerError;
use crate::exporter::{banner_filename, encode, ClipboardSink, EncodedImage, FileSink};
use crate::image_loading::{load_image, ImageSource};
use crate::preset::Preset;
use crate::request::{BannerForm, BannerRequest, DecodedImage};
use callbanner_canvas::ResolvedFontConfig;
use futures::future::try_join;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Holds the busy flag for the duration of one render.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone)]
struct LastRender {
    image: EncodedImage,
    filename: String,
}

/// Generates banners and keeps the most recent one.
///
/// All methods take `&self`; wrap the generator in an [`Arc`] to share it
/// between tasks. A second [`generate`](Self::generate) while one is in
/// flight fails with [`BannerError::Busy`].
pub struct BannerGenerator {
    config: BannerConfig,
    fonts: Arc<ResolvedFontConfig>,
    busy: AtomicBool,
    last: Mutex<Option<LastRender>>,
}

impl BannerGenerator {
    /// Create a generator, resolving the configured fonts once.
    pub fn new(config: BannerConfig) -> Self {
        let fonts = config.font_config().resolve();
        Self::with_fonts(config, fonts)
    }

    /// Create a generator with an already resolved font database.
    pub fn with_fonts(config: BannerConfig, fonts: ResolvedFontConfig) -> Self {
        log::debug!("Banner generator using {:?}", fonts);
        Self {
            config,
            fonts: Arc::new(fonts),
            busy: AtomicBool::new(false),
            last: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &BannerConfig {
        &self.config
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Validate `form`, render it with `preset` and keep the result as the
    /// last image.
    ///
    /// The profile photo and any icon bitmaps load concurrently, each bounded
    /// by the configured decode timeout. If any of them fails the render
    /// fails and the previous image is kept.
    pub async fn generate(
        &self,
        form: &BannerForm,
        preset: Preset,
    ) -> Result<EncodedImage, BannerError> {
        let (company_name, person_name) = form.validate()?;
        let _guard = BusyGuard::acquire(&self.busy).ok_or(BannerError::Busy)?;

        let timeout = self.config.decode_timeout();
        let (profile_image, icons) =
            try_join(self.load_profile(form, timeout), self.load_icons(timeout)).await?;
        let request = BannerRequest::new(&company_name, &person_name, profile_image)?;

        let fonts = self.fonts.clone();
        let ppi = self.config.ppi;
        let image = tokio::task::spawn_blocking(move || {
            let surface = compose(&request, preset, &icons, &fonts)?;
            encode(&surface, Some(ppi))
        })
        .await
        .map_err(|err| BannerError::RenderTargetUnavailable(format!("render task failed: {err}")))??;

        log::info!(
            "Generated {} banner for {:?} ({} bytes)",
            preset,
            person_name,
            image.bytes().len()
        );
        *self.lock_last() = Some(LastRender {
            image: image.clone(),
            filename: banner_filename(&person_name),
        });
        Ok(image)
    }

    async fn load_profile(
        &self,
        form: &BannerForm,
        timeout: Duration,
    ) -> Result<Option<DecodedImage>, BannerError> {
        match &form.profile {
            Some(upload) => {
                let source = ImageSource::bytes(upload.name(), upload.bytes().clone());
                load_image(&source, timeout).await.map(Some)
            }
            None => Ok(None),
        }
    }

    async fn load_icons(&self, timeout: Duration) -> Result<ButtonIcons, BannerError> {
        let Some(icons) = &self.config.icons else {
            return Ok(ButtonIcons::Glyphs);
        };
        let (decline_source, accept_source) = icons.sources();
        let (decline, accept) = try_join(
            load_image(&decline_source, timeout),
            load_image(&accept_source, timeout),
        )
        .await?;
        Ok(ButtonIcons::Bitmaps {
            decline: decline.to_canvas_image(&decline_source.to_string())?,
            accept: accept.to_canvas_image(&accept_source.to_string())?,
        })
    }

    /// The last successfully generated image, if any.
    pub fn last_image(&self) -> Option<EncodedImage> {
        self.lock_last().as_ref().map(|last| last.image.clone())
    }

    /// Suggested filename for the last image.
    pub fn last_filename(&self) -> Option<String> {
        self.lock_last().as_ref().map(|last| last.filename.clone())
    }

    /// Save the last image through `sink` as `fake-call-<slug>.png`.
    pub fn download(&self, sink: &dyn FileSink) -> Result<PathBuf, BannerError> {
        let last = self.lock_last().clone().ok_or(BannerError::NothingRendered)?;
        sink.save(&last.image, &last.filename)
    }

    /// Copy the last image through `clipboard`. The image stays available on failure.
    pub fn copy(&self, clipboard: &dyn ClipboardSink) -> Result<(), BannerError> {
        let image = self.last_image().ok_or(BannerError::NothingRendered)?;
        clipboard.copy_image(&image)?;
        log::info!("Copied banner to clipboard");
        Ok(())
    }

    fn lock_last(&self) -> MutexGuard<'_, Option<LastRender>> {
        self.last.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for BannerGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BannerGenerator")
            .field("config", &self.config)
            .field("fonts", &self.fonts)
            .field("busy", &self.is_busy())
            .finish()
    }
}

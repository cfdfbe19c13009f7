#![allow(clippy::uninlined_format_args)]
#![doc = include_str!("../README.md")]

pub mod compositor;
pub mod config;
pub mod error;
pub mod exporter;
pub mod generator;
pub mod image_loading;
pub mod preset;
pub mod request;

#[macro_use]
extern crate lazy_static;

pub use compositor::{compose, ButtonIcons};
pub use config::{BannerConfig, FontSettings, IconConfig};
pub use error::{BannerError, FormField, ValidationError, MAX_UPLOAD_BYTES};
#[cfg(feature = "clipboard")]
pub use exporter::SystemClipboard;
pub use exporter::{
    banner_filename, default_clipboard, encode, slugify, ClipboardSink, DirectorySink,
    EncodedImage, FileSink, PathSink, UnavailableClipboard,
};
pub use generator::BannerGenerator;
pub use image_loading::{load_image, ImageSource};
pub use preset::{Preset, StyleProfile};
pub use request::{BannerForm, BannerRequest, DecodedImage, ProfileUpload};

use callbanner_canvas::FontConfig;
use callbanner_rs::{
    BannerConfig, BannerError, BannerForm, BannerGenerator, DirectorySink, IconConfig, Preset,
    ProfileUpload,
};
use rstest::rstest;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::time::Duration;

fn generator(config: BannerConfig) -> BannerGenerator {
    let fonts = FontConfig {
        load_system_fonts: false,
        ..FontConfig::default()
    }
    .resolve();
    BannerGenerator::with_fonts(config, fonts)
}

fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let mut buf = Vec::new();
    image::RgbaImage::from_pixel(width, height, image::Rgba(color))
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn decode(bytes: &[u8]) -> image::RgbaImage {
    image::load_from_memory(bytes).unwrap().to_rgba8()
}

/// Minimal HTTP server for icon sources.
///
/// `/hang` accepts the connection and never answers, `/missing` is a 404 and
/// every other path serves a small white PNG.
struct IconServer {
    port: u16,
}

impl IconServer {
    fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        std::thread::spawn(move || {
            let mut held = Vec::new();
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let path = read_request_path(&mut stream);
                match path.as_str() {
                    "/hang" => held.push(stream),
                    "/missing" => respond(&mut stream, "404 Not Found", "text/plain", b"missing"),
                    _ => respond(
                        &mut stream,
                        "200 OK",
                        "image/png",
                        &png_bytes(8, 8, [255, 255, 255, 255]),
                    ),
                }
            }
        });
        Self { port }
    }

    fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }
}

fn read_request_path(stream: &mut TcpStream) -> String {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8_lossy(&request)
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_string()
}

fn respond(stream: &mut TcpStream, status: &str, content_type: &str, body: &[u8]) {
    let header = format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(body);
}

fn icon_config(server: &IconServer, decline: &str, accept: &str, timeout_ms: u64) -> BannerConfig {
    BannerConfig {
        decode_timeout_ms: timeout_ms,
        icons: Some(IconConfig {
            decline: server.url(decline),
            accept: server.url(accept),
        }),
        ..BannerConfig::default()
    }
}

#[rstest]
#[case(Preset::FullScreen, 1080, 1920)]
#[case(Preset::Banner, 1000, 200)]
#[case(Preset::BannerLarge, 1200, 400)]
#[case(Preset::Compact, 900, 200)]
#[tokio::test]
async fn test_png_dimensions(#[case] preset: Preset, #[case] width: u32, #[case] height: u32) {
    let generator = generator(BannerConfig::default());
    let image = generator
        .generate(&BannerForm::new("Acme Corp", "Jane Appleseed"), preset)
        .await
        .unwrap();
    assert_eq!(image.mime_type(), "image/png");

    // IHDR width and height follow the 8-byte signature and the chunk header.
    let bytes = image.bytes();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(&bytes[12..16], b"IHDR");
    assert_eq!(u32::from_be_bytes(bytes[16..20].try_into().unwrap()), width);
    assert_eq!(u32::from_be_bytes(bytes[20..24].try_into().unwrap()), height);
}

#[tokio::test]
async fn test_deterministic_output() {
    let photo = ProfileUpload::sniffed("me.png", png_bytes(40, 20, [200, 30, 30, 255])).unwrap();
    let form = BannerForm::new("Acme", "Jane").with_profile(photo);
    let first = generator(BannerConfig::default())
        .generate(&form, Preset::Compact)
        .await
        .unwrap();
    let second = generator(BannerConfig::default())
        .generate(&form, Preset::Compact)
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_profile_photo_fills_circle() {
    let photo = ProfileUpload::sniffed("me.png", png_bytes(40, 20, [200, 30, 30, 255])).unwrap();
    let form = BannerForm::new("Acme", "Jane").with_profile(photo);
    let image = generator(BannerConfig::default())
        .generate(&form, Preset::Compact)
        .await
        .unwrap();
    let pixels = decode(image.bytes());
    // Compact: margin 10, padding 30, profile inset 20, so the circle is
    // centred at (10 + 30 + 70, 100) with radius 70.
    assert_eq!(pixels.get_pixel(110, 100).0, [200, 30, 30, 255]);
    // Corners outside the pill stay transparent.
    assert_eq!(pixels.get_pixel(0, 0).0[3], 0);
}

#[tokio::test]
async fn test_bitmap_icons_from_http() {
    let server = IconServer::start();
    let generator = generator(icon_config(&server, "/api/drop-icon", "/api/pick-icon", 5_000));
    let image = generator
        .generate(&BannerForm::new("Acme", "Jane"), Preset::Compact)
        .await
        .unwrap();
    assert_eq!((image.width(), image.height()), (900, 200));
}

#[tokio::test]
async fn test_failing_icon_fails_render() {
    let server = IconServer::start();
    let generator = generator(icon_config(&server, "/api/drop-icon", "/missing", 5_000));
    let err = generator
        .generate(&BannerForm::new("Acme", "Jane"), Preset::Compact)
        .await
        .unwrap_err();
    match err {
        BannerError::ImageDecode { source_name, reason } => {
            assert!(source_name.ends_with("/missing"), "{source_name}");
            assert!(reason.contains("404"), "{reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!generator.is_busy());
    assert!(generator.last_image().is_none());
}

#[tokio::test]
async fn test_hanging_icon_times_out() {
    let server = IconServer::start();
    let generator = generator(icon_config(&server, "/hang", "/api/pick-icon", 200));
    let err = generator
        .generate(&BannerForm::new("Acme", "Jane"), Preset::Compact)
        .await
        .unwrap_err();
    match err {
        BannerError::ImageDecode { reason, .. } => assert!(reason.contains("timed out"), "{reason}"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!generator.is_busy());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_second_generate_is_busy() {
    let server = IconServer::start();
    let generator = Arc::new(generator(icon_config(&server, "/hang", "/hang", 1_500)));

    let first = {
        let generator = generator.clone();
        tokio::spawn(async move {
            generator
                .generate(&BannerForm::new("Acme", "Jane"), Preset::Compact)
                .await
        })
    };

    let started = tokio::time::Instant::now();
    while !generator.is_busy() {
        assert!(started.elapsed() < Duration::from_secs(1), "first render never started");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let second = generator
        .generate(&BannerForm::new("Acme", "John"), Preset::Compact)
        .await;
    assert!(matches!(second, Err(BannerError::Busy)));

    let first = first.await.unwrap();
    assert!(matches!(first, Err(BannerError::ImageDecode { .. })));
    assert!(!generator.is_busy());
}

#[tokio::test]
async fn test_generator_reusable_after_failure() {
    let dir = tempfile::tempdir().unwrap();
    let generator = generator(BannerConfig::default());

    let bad = ProfileUpload::new("broken.jpg", "image/jpeg", vec![0xff, 0xd8, 0x00]).unwrap();
    let err = generator
        .generate(&BannerForm::new("Acme", "Jane").with_profile(bad), Preset::Banner)
        .await
        .unwrap_err();
    assert!(matches!(err, BannerError::ImageDecode { .. }));

    generator
        .generate(&BannerForm::new("Acme", "Jane Doe"), Preset::Banner)
        .await
        .unwrap();
    let path = generator.download(&DirectorySink::new(dir.path())).unwrap();
    assert_eq!(path.file_name().unwrap(), "fake-call-jane-doe.png");
    assert_eq!(decode(&std::fs::read(path).unwrap()).dimensions(), (1000, 200));
}

#[tokio::test]
async fn test_download_with_path_characters_in_name() {
    let dir = tempfile::tempdir().unwrap();
    let generator = generator(BannerConfig::default());
    generator
        .generate(&BannerForm::new("Acme", "AC/DC Tribute"), Preset::Compact)
        .await
        .unwrap();
    assert_eq!(
        generator.last_filename().as_deref(),
        Some("fake-call-ac-dc-tribute.png")
    );
    let path = generator.download(&DirectorySink::new(dir.path())).unwrap();
    assert_eq!(path, dir.path().join("fake-call-ac-dc-tribute.png"));
    assert!(path.exists());
}

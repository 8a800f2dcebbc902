use super::*;

#[test]
fn resolve_asset_path_normalizes() {
    let p = |s: &str| resolve_asset_path(&ImageSrc::new(s));
    assert_eq!(p("/images/a.jpg").unwrap(), "images/a.jpg");
    assert_eq!(p("images\\a.jpg").unwrap(), "images/a.jpg");
    assert_eq!(p("/images/./a.jpg?angle=30").unwrap(), "images/a.jpg");
    assert!(p("/images/../secret.jpg").is_err());
    assert!(p("/").is_err());
    assert!(p("").is_err());
    assert!(p("data:image/png;base64,AAAA").is_err());
}

#[test]
fn fs_loader_reads_and_decodes() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("images")).unwrap();
    image::RgbaImage::from_pixel(3, 2, image::Rgba([9, 8, 7, 255]))
        .save(dir.path().join("images/a.png"))
        .unwrap();

    let loader = FsImageLoader::new(dir.path());
    let img = loader.load(&ImageSrc::new("/images/a.png?angle=15")).unwrap();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(0, 0).0, [9, 8, 7, 255]);
}

#[test]
fn fs_loader_missing_file_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let loader = FsImageLoader::new(dir.path());
    let err = loader.load(&ImageSrc::new("/images/none.jpg")).unwrap_err();
    assert!(err.to_string().contains("load error:"));
}

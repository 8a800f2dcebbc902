use super::*;

fn srcs(paths: &[&str]) -> Vec<ImageSrc> {
    paths.iter().map(|p| ImageSrc::new(*p)).collect()
}

fn presenter() -> HeroPresenter {
    HeroPresenter::new(ImageSrc::new("/images/placeholder.svg"))
}

#[test]
fn hero_swaps_only_after_load() {
    let gallery = srcs(&["/a.jpg", "/b.jpg", "/c.jpg"]);
    let mut p = presenter();
    assert_eq!(p.state(), &HeroState::Idle);

    let req = p.show(&gallery, 0).unwrap();
    assert_eq!(req.candidate, gallery[0]);
    assert_eq!(req.preload, srcs(&["/b.jpg", "/c.jpg"]));
    assert!(p.visible().is_none());
    assert!(p.on_loaded(req.token));
    assert_eq!(p.visible(), Some(&gallery[0]));

    let req = p.show(&gallery, 2).unwrap();
    assert!(p.is_loading());
    assert_eq!(p.visible(), Some(&gallery[0]));
    p.on_loaded(req.token);
    assert_eq!(p.state(), &HeroState::Shown(gallery[2].clone()));
}

#[test]
fn stale_completion_is_ignored() {
    let red = srcs(&["/red.jpg"]);
    let blue = srcs(&["/blue.jpg"]);
    let mut p = presenter();
    let first = p.show(&red, 0).unwrap();
    assert!(p.on_loaded(first.token));

    // Two quick switches; the older load finishes last.
    let to_blue = p.show(&blue, 0).unwrap();
    let to_red = p.show(&srcs(&["/red2.jpg"]), 0).unwrap();
    assert!(!p.on_loaded(to_blue.token));
    assert_eq!(p.visible(), Some(&red[0]));
    assert!(!p.on_failed(to_blue.token));
    assert!(p.on_loaded(to_red.token));
    assert_eq!(p.visible().unwrap().as_str(), "/red2.jpg");
}

#[test]
fn failure_shows_placeholder() {
    let mut p = presenter();
    let req = p.show(&srcs(&["/missing.jpg"]), 0).unwrap();
    assert!(p.on_failed(req.token));
    assert_eq!(p.visible().unwrap().as_str(), "/images/placeholder.svg");
}

#[test]
fn empty_gallery_shows_placeholder_without_loading() {
    let mut p = presenter();
    assert!(p.show(&[], 0).is_none());
    assert_eq!(
        p.state(),
        &HeroState::Shown(ImageSrc::new("/images/placeholder.svg"))
    );
}

#[test]
fn reshowing_current_or_pending_image_is_a_no_op() {
    let gallery = srcs(&["/a.jpg", "/b.jpg"]);
    let mut p = presenter();
    let req = p.show(&gallery, 1).unwrap();
    assert!(p.show(&gallery, 1).is_none());
    p.on_loaded(req.token);
    assert!(p.show(&gallery, 1).is_none());
    assert!(p.show(&gallery, 0).is_some());
}

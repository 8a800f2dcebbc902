use crate::assets::{ImageCache, ImageLoader};
use crate::catalog::{Bike, ColorImageMap};
use crate::config::GalleryConfig;
use crate::finance::LoanTerms;
use crate::foundation::core::ImageSrc;
use crate::gallery::presenter::{HeroPresenter, LoadRequest};
use crate::gallery::resolver::ColorResolver;
use crate::tint::GalleryGenerator;

/// State of one bike-detail view: color, gallery, hero and loan calculator.
///
/// Every navigation returns the [`LoadRequest`] the host has to fulfil, if any; completions are
/// fed back through [`DetailSession::on_hero_loaded`] / [`DetailSession::on_hero_failed`] or
/// handled in one step by [`DetailSession::fulfil`].
pub struct DetailSession<'a> {
    bike: &'a Bike,
    color_map: &'a ColorImageMap,
    generator: &'a dyn GalleryGenerator,
    resolver: ColorResolver,
    presenter: HeroPresenter,
    selected_color: Option<String>,
    gallery: Vec<ImageSrc>,
    image_index: usize,
    loan: LoanTerms,
}

impl<'a> DetailSession<'a> {
    /// Open the view on the first listed color (or the base gallery when the bike lists none).
    pub fn open(
        bike: &'a Bike,
        color_map: &'a ColorImageMap,
        generator: &'a dyn GalleryGenerator,
        config: &GalleryConfig,
    ) -> (Self, Option<LoadRequest>) {
        let mut session = Self {
            bike,
            color_map,
            generator,
            resolver: ColorResolver::new(),
            presenter: HeroPresenter::new(config.placeholder.clone()),
            selected_color: None,
            gallery: bike.base_gallery(),
            image_index: 0,
            loan: LoanTerms::for_price(bike.price, config),
        };

        let request = match bike.color_names().first() {
            Some(first) => session.select_color(first),
            None => session.presenter.show(&session.gallery, 0),
        };
        (session, request)
    }

    pub fn bike(&self) -> &Bike {
        self.bike
    }

    pub fn selected_color(&self) -> Option<&str> {
        self.selected_color.as_deref()
    }

    /// Gallery for the current selection; also the thumbnail strip.
    pub fn gallery(&self) -> &[ImageSrc] {
        &self.gallery
    }

    pub fn image_index(&self) -> usize {
        self.image_index
    }

    pub fn presenter(&self) -> &HeroPresenter {
        &self.presenter
    }

    /// Image currently shown as the hero.
    pub fn hero(&self) -> Option<&ImageSrc> {
        self.presenter.visible()
    }

    /// Generated galleries produced so far in this view.
    pub fn generation_count(&self) -> usize {
        self.resolver.generation_count()
    }

    /// Switch color. Re-selecting the current color is a no-op.
    pub fn select_color(&mut self, color: &str) -> Option<LoadRequest> {
        if self.selected_color.as_deref() == Some(color) {
            return None;
        }
        if !self.bike.color_names().iter().any(|c| c == color) {
            tracing::debug!(bike = %self.bike.id, color, "color not listed for bike");
        }

        let gallery =
            self.resolver
                .resolve_with(self.bike, self.color_map, color, self.generator);
        self.selected_color = Some(color.to_owned());
        self.gallery = gallery;
        self.image_index = 0;
        self.presenter.show(&self.gallery, 0)
    }

    /// Select a thumbnail; out-of-range indices are ignored.
    pub fn select_image(&mut self, index: usize) -> Option<LoadRequest> {
        if index >= self.gallery.len() {
            return None;
        }
        self.image_index = index;
        self.presenter.show(&self.gallery, index)
    }

    pub fn next_image(&mut self) -> Option<LoadRequest> {
        let n = self.gallery.len();
        if n == 0 {
            return None;
        }
        self.select_image((self.image_index + 1) % n)
    }

    pub fn prev_image(&mut self) -> Option<LoadRequest> {
        let n = self.gallery.len();
        if n == 0 {
            return None;
        }
        self.select_image((self.image_index + n - 1) % n)
    }

    /// Feed a finished hero load back in.
    pub fn on_hero_loaded(&mut self, request: &LoadRequest) -> bool {
        self.presenter.on_loaded(request.token)
    }

    /// Feed a failed hero load back in.
    pub fn on_hero_failed(&mut self, request: &LoadRequest) -> bool {
        self.presenter.on_failed(request.token)
    }

    /// Load the candidate through `cache`, warm the rest of the gallery, and apply the outcome.
    pub fn fulfil<L: ImageLoader>(
        &mut self,
        request: &LoadRequest,
        cache: &mut ImageCache<L>,
    ) -> bool {
        let changed = match cache.get_or_load(&request.candidate) {
            Ok(_) => self.on_hero_loaded(request),
            Err(e) => {
                tracing::debug!(error = %e, "hero load failed");
                self.on_hero_failed(request)
            }
        };
        cache.preload_all(&request.preload);
        changed
    }

    pub fn loan(&self) -> &LoanTerms {
        &self.loan
    }

    pub fn set_loan_amount(&mut self, principal: f64) {
        self.loan.principal = principal;
    }

    pub fn set_tenure(&mut self, months: u32) {
        self.loan.tenure_months = months;
    }

    pub fn set_rate(&mut self, annual_rate_pct: f64) {
        self.loan.annual_rate_pct = annual_rate_pct;
    }

    /// Rounded monthly installment, or `None` while the inputs are unusable.
    pub fn emi(&self) -> Option<u64> {
        self.loan.validate().ok()?;
        Some(self.loan.monthly_payment_rounded())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/session.rs"]
mod tests;

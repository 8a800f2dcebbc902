use crate::foundation::core::ImageSrc;

/// Identifies one hero load; completions carrying an older token are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadToken(pub u64);

/// Hero image lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeroState {
    /// Nothing requested yet.
    Idle,
    /// `candidate` is loading; the previously shown image stays visible.
    Loading { candidate: ImageSrc, token: LoadToken },
    /// `0` is on screen.
    Shown(ImageSrc),
}

/// Work the host must perform after a transition into [`HeroState::Loading`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub token: LoadToken,
    /// Image to load for the hero.
    pub candidate: ImageSrc,
    /// Every other image of the gallery, to warm in the background.
    pub preload: Vec<ImageSrc>,
}

/// Swaps the hero image only once its replacement has finished loading.
#[derive(Clone, Debug)]
pub struct HeroPresenter {
    state: HeroState,
    visible: Option<ImageSrc>,
    next_token: u64,
    placeholder: ImageSrc,
}

impl HeroPresenter {
    pub fn new(placeholder: ImageSrc) -> Self {
        Self {
            state: HeroState::Idle,
            visible: None,
            next_token: 0,
            placeholder,
        }
    }

    pub fn state(&self) -> &HeroState {
        &self.state
    }

    /// Image currently on screen.
    pub fn visible(&self) -> Option<&ImageSrc> {
        self.visible.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, HeroState::Loading { .. })
    }

    /// Request `gallery[index]` as the hero.
    ///
    /// Returns `None` when nothing has to load: the candidate is already shown or in flight, or
    /// the gallery is empty (the placeholder is shown directly).
    pub fn show(&mut self, gallery: &[ImageSrc], index: usize) -> Option<LoadRequest> {
        let Some(candidate) = gallery
            .get(index)
            .or_else(|| gallery.first())
            .filter(|s| !s.is_blank())
            .cloned()
        else {
            tracing::debug!("empty gallery; showing placeholder");
            self.set_shown(self.placeholder.clone());
            return None;
        };

        match &self.state {
            HeroState::Shown(src) if *src == candidate => return None,
            HeroState::Loading { candidate: c, .. } if *c == candidate => return None,
            _ => {}
        }

        self.next_token += 1;
        let token = LoadToken(self.next_token);
        tracing::debug!(candidate = %candidate.abbreviated(), token = token.0, "hero loading");

        let mut preload: Vec<ImageSrc> = Vec::with_capacity(gallery.len());
        for src in gallery {
            if *src != candidate && !src.is_blank() && !preload.contains(src) {
                preload.push(src.clone());
            }
        }

        self.state = HeroState::Loading {
            candidate: candidate.clone(),
            token,
        };
        Some(LoadRequest {
            token,
            candidate,
            preload,
        })
    }

    /// The load for `token` finished. Returns whether the hero changed.
    pub fn on_loaded(&mut self, token: LoadToken) -> bool {
        match &self.state {
            HeroState::Loading { candidate, token: t } if *t == token => {
                let candidate = candidate.clone();
                self.set_shown(candidate);
                true
            }
            _ => {
                tracing::debug!(token = token.0, "stale hero load ignored");
                false
            }
        }
    }

    /// The load for `token` failed; the placeholder replaces the hero.
    pub fn on_failed(&mut self, token: LoadToken) -> bool {
        match &self.state {
            HeroState::Loading { candidate, token: t } if *t == token => {
                tracing::warn!(candidate = %candidate.abbreviated(), "hero image failed to load");
                self.set_shown(self.placeholder.clone());
                true
            }
            _ => false,
        }
    }

    fn set_shown(&mut self, src: ImageSrc) {
        self.visible = Some(src.clone());
        self.state = HeroState::Shown(src);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/presenter.rs"]
mod tests;

//! Home-page slide carousel.

use super::Binding;
use crate::dom::{Dom, FrameworkWidget};
use crate::env::Env;

pub const CAROUSEL_SELECTOR: &str = "#mainCarousel";

/// Hand `#mainCarousel` to the UI framework's carousel.
pub fn bind<D: Dom + 'static>(env: &Env<D>) -> Binding {
    if let Some(node) = env.dom.query(CAROUSEL_SELECTOR) {
        let widget =
            FrameworkWidget::Carousel { interval_ms: env.config.carousel_interval_ms, wrap: env.config.carousel_wrap };
        env.dom.mount_widget(&node, widget);
        log::debug!("carousel mounted");
    }
    Binding::empty("carousel")
}

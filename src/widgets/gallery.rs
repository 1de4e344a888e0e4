//! Product-page image gallery: thumbnails swap the main image.

use std::rc::Rc;

use super::Binding;
use crate::dom::{Dom, EventKind, Target};
use crate::env::Env;

#[cfg(test)]
#[path = "gallery_test.rs"]
mod gallery_test;

pub const THUMBNAIL_SELECTOR: &str = ".product-thumbnail";
pub const MAIN_IMAGE_SELECTOR: &str = ".product-image";
const ACTIVE: &str = "active";

/// Full-size variant of a thumbnail URL: the first `thumb` becomes `large`.
#[must_use]
pub fn large_image_src(thumb_src: &str) -> String {
    thumb_src.replacen("thumb", "large", 1)
}

pub fn bind<D: Dom + 'static>(env: &Env<D>) -> Binding {
    let thumbnails = Rc::new(env.dom.query_all(THUMBNAIL_SELECTOR));
    let Some(main_image) = env.dom.query(MAIN_IMAGE_SELECTOR) else {
        return Binding::empty("gallery");
    };

    let listeners = thumbnails
        .iter()
        .map(|thumb| {
            let dom = Rc::clone(&env.dom);
            let all = Rc::clone(&thumbnails);
            let main_image = main_image.clone();
            let this = thumb.clone();
            env.dom.listen(
                Target::Node(thumb),
                EventKind::Click,
                Box::new(move |_| {
                    for other in all.iter() {
                        dom.remove_class(other, ACTIVE);
                    }
                    dom.add_class(&this, ACTIVE);
                    if let Some(src) = dom.attribute(&this, "src") {
                        dom.set_attribute(&main_image, "src", &large_image_src(&src));
                    }
                }),
            )
        })
        .collect();
    Binding::new("gallery", listeners)
}

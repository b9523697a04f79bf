// resolver.rs - Selection to camera target lookup

use serde::{Deserialize, Serialize};

use crate::animation::CameraTransform;
use crate::catalog::Catalog;
use crate::selection::Selection;

/// Which catalog entry produced a resolved view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewSource {
    Poi,
    CategoryDefault,
    /// A path was selected but the category has no such entry
    LookupMiss,
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedView {
    pub transform: CameraTransform,
    pub source: ViewSource,
}

/// Map a selection to the camera transform it should show.
///
/// Pure: the same inputs always produce the same output. Unknown paths
/// degrade to the category default, and categories without a configured
/// default view degrade to home.
pub fn resolve(selection: &Selection, catalog: &Catalog) -> ResolvedView {
    let Some(category) = selection.category else {
        return ResolvedView { transform: catalog.home(), source: ViewSource::Home };
    };

    let category_view = |source| ResolvedView {
        transform: catalog.default_view(category).unwrap_or_else(|| catalog.home()),
        source,
    };

    match selection.path.as_deref() {
        Some(name) => match catalog.find(category, name) {
            Some(poi) => ResolvedView { transform: poi.camera(), source: ViewSource::Poi },
            None => {
                log::warn!("no point of interest {name:?} in {category}; using category view");
                category_view(ViewSource::LookupMiss)
            }
        },
        None => category_view(ViewSource::CategoryDefault),
    }
}

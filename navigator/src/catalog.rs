// catalog.rs - Static point-of-interest data: categories, views and routes

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::{CameraTransform, Vec3};
use crate::error_handling::{NavigatorError, Result};
use crate::path::RoutePath;

const DEMO_CATALOG_JSON: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/catalog.json"
));

/// Fixed classification of points of interest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Portfolio,
    Historical,
    Recreational,
    Schools,
    Hotels,
    Hospitals,
    ConnectivityPresent,
    ConnectivityFuture,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Portfolio,
        Category::Historical,
        Category::Recreational,
        Category::Schools,
        Category::Hotels,
        Category::Hospitals,
        Category::ConnectivityPresent,
        Category::ConnectivityFuture,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Portfolio => "portfolio",
            Category::Historical => "historical",
            Category::Recreational => "recreational",
            Category::Schools => "schools",
            Category::Hotels => "hotels",
            Category::Hospitals => "hospitals",
            Category::ConnectivityPresent => "connectivity-present",
            Category::ConnectivityFuture => "connectivity-future",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named location with its camera view and optional route polyline
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    pub name: String,
    pub category: Category,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub points: Vec<Vec3>,
}

impl PointOfInterest {
    pub fn camera(&self) -> CameraTransform {
        CameraTransform::new(self.camera_position, self.camera_target)
    }

    pub fn route(&self) -> RoutePath {
        RoutePath::new(self.points.clone())
    }
}

// ============================================================================
// ON-DISK FORMAT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub home: CameraTransform,
    #[serde(default)]
    pub categories: Vec<CategoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub category: Category,
    #[serde(default)]
    pub default_view: Option<CameraTransform>,
    #[serde(default)]
    pub points_of_interest: Vec<PoiEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoiEntry {
    pub name: String,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    #[serde(default)]
    pub points: Vec<Vec3>,
}

// ============================================================================
// CATALOG
// ============================================================================

/// Immutable lookup tables built once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    home: CameraTransform,
    defaults: BTreeMap<Category, CameraTransform>,
    pois: BTreeMap<Category, Vec<PointOfInterest>>,
}

impl Catalog {
    /// Empty catalog that only knows the home view
    pub fn new(home: CameraTransform) -> Self {
        Self {
            home,
            defaults: BTreeMap::new(),
            pois: BTreeMap::new(),
        }
    }

    /// Catalog bundled with the crate
    pub fn demo() -> Result<Self> {
        Self::from_json_str(DEMO_CATALOG_JSON)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::try_from(file)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| NavigatorError::io(path, e))?;
        let catalog = Self::from_json_str(&json)?;
        log::info!(
            "Loaded catalog from {}: {} categories, {} points of interest",
            path.display(),
            catalog.categories().count(),
            catalog.poi_count()
        );
        Ok(catalog)
    }

    pub fn with_default_view(mut self, category: Category, view: CameraTransform) -> Self {
        self.defaults.insert(category, view);
        self
    }

    /// Insert a point of interest, rejecting duplicate names per category
    pub fn add_poi(&mut self, poi: PointOfInterest) -> Result<()> {
        check_finite(poi.camera(), || format!("camera of {:?}", poi.name))?;
        if poi.points.iter().any(|p| !p.is_finite()) {
            return Err(NavigatorError::NonFiniteCoordinate {
                context: format!("route of {:?}", poi.name),
            });
        }

        let entries = self.pois.entry(poi.category).or_default();
        if entries.iter().any(|p| p.name == poi.name) {
            return Err(NavigatorError::DuplicatePoi {
                category: poi.category,
                name: poi.name,
            });
        }
        entries.push(poi);
        Ok(())
    }

    pub fn home(&self) -> CameraTransform {
        self.home
    }

    pub fn default_view(&self, category: Category) -> Option<CameraTransform> {
        self.defaults.get(&category).copied()
    }

    pub fn find(&self, category: Category, name: &str) -> Option<&PointOfInterest> {
        self.pois.get(&category)?.iter().find(|p| p.name == name)
    }

    /// Points of interest of one category, in file order
    pub fn points_in(&self, category: Category) -> &[PointOfInterest] {
        self.pois.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Categories with a default view or at least one point of interest
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(|c| self.defaults.contains_key(c) || self.pois.contains_key(c))
    }

    pub fn poi_count(&self) -> usize {
        self.pois.values().map(Vec::len).sum()
    }

    /// Convert back to the on-disk shape
    pub fn to_file(&self) -> CatalogFile {
        let categories = self
            .categories()
            .map(|category| CategoryEntry {
                category,
                default_view: self.default_view(category),
                points_of_interest: self
                    .points_in(category)
                    .iter()
                    .map(|p| PoiEntry {
                        name: p.name.clone(),
                        camera_position: p.camera_position,
                        camera_target: p.camera_target,
                        points: p.points.clone(),
                    })
                    .collect(),
            })
            .collect();

        CatalogFile { home: self.home, categories }
    }
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = NavigatorError;

    fn try_from(file: CatalogFile) -> Result<Self> {
        check_finite(file.home, || "home view".to_string())?;
        let mut catalog = Catalog::new(file.home);

        let mut seen = Vec::with_capacity(file.categories.len());
        for entry in file.categories {
            if seen.contains(&entry.category) {
                return Err(NavigatorError::DuplicateCategory(entry.category));
            }
            seen.push(entry.category);

            if let Some(view) = entry.default_view {
                check_finite(view, || format!("default view of {}", entry.category))?;
                catalog.defaults.insert(entry.category, view);
            }

            for poi in entry.points_of_interest {
                catalog.add_poi(PointOfInterest {
                    name: poi.name,
                    category: entry.category,
                    camera_position: poi.camera_position,
                    camera_target: poi.camera_target,
                    points: poi.points,
                })?;
            }
        }

        Ok(catalog)
    }
}

fn check_finite(view: CameraTransform, context: impl FnOnce() -> String) -> Result<()> {
    if view.is_finite() {
        Ok(())
    } else {
        Err(NavigatorError::NonFiniteCoordinate { context: context() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_loads() {
        let catalog = Catalog::demo().unwrap();
        assert!(catalog.default_view(Category::Historical).is_some());
        let church = catalog.find(Category::Historical, "Mount Mary Church").unwrap();
        assert_eq!(church.camera_position, Vec3::new(100.0, 200.0, 300.0));
        assert!(church.route().is_revealable());
        assert!(catalog.poi_count() > 5);
    }

    #[test]
    fn test_category_wire_names() {
        let json = serde_json::to_string(&Category::ConnectivityFuture).unwrap();
        assert_eq!(json, "\"connectivity-future\"");
        for c in Category::ALL {
            let back: Category = serde_json::from_str(&format!("\"{c}\"")).unwrap();
            assert_eq!(back, c);
        }
    }

    #[test]
    fn test_duplicate_poi_rejected() {
        let json = r#"{
            "home": { "position": [0, 10, 10], "target": [0, 0, 0] },
            "categories": [{
                "category": "hotels",
                "points_of_interest": [
                    { "name": "Taj", "camera_position": [1, 2, 3], "camera_target": [0, 0, 0] },
                    { "name": "Taj", "camera_position": [4, 5, 6], "camera_target": [0, 0, 0] }
                ]
            }]
        }"#;
        let err = Catalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, NavigatorError::DuplicatePoi { category: Category::Hotels, .. }));
    }

    #[test]
    fn test_same_name_in_different_categories_allowed() {
        let mut catalog = Catalog::new(CameraTransform::default());
        for category in [Category::Schools, Category::Hospitals] {
            catalog
                .add_poi(PointOfInterest {
                    name: "St. Andrews".into(),
                    category,
                    camera_position: Vec3::new(1.0, 1.0, 1.0),
                    camera_target: Vec3::zero(),
                    points: vec![],
                })
                .unwrap();
        }
        assert_eq!(catalog.poi_count(), 2);
        assert!(catalog.points_in(Category::Hotels).is_empty());
    }

    #[test]
    fn test_unknown_category_is_parse_error() {
        let json = r#"{ "home": { "position": [0,0,0], "target": [0,0,0] },
                        "categories": [{ "category": "casinos" }] }"#;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(NavigatorError::Serialization(_))
        ));
    }

    #[test]
    fn test_round_trip_through_file_shape() {
        let catalog = Catalog::demo().unwrap();
        let json = serde_json::to_string(&catalog.to_file()).unwrap();
        assert_eq!(Catalog::from_json_str(&json).unwrap(), catalog);
    }
}

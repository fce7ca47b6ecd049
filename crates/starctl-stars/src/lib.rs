//! Star-field layer of the star control puzzle: a catalog of stars in 3D
//! space, projected through a camera onto a pixel surface, with views that
//! pick, mark and persist stars.

pub mod base_stars;
pub mod camera;
pub mod closeup;
pub mod entry;
pub mod error;
pub mod markers;
pub mod range;
pub mod resources;
pub mod save_file;
pub mod star_vector;
pub mod starfield;
pub mod surface;
pub mod view;
pub mod visitor;

pub use base_stars::{BaseStars, DEFAULT_PICK_RADIUS, STAR_DATA_HEADER};
pub use camera::{CameraView, MAX_LOCKED_STARS, StarCamera, StarTint};
pub use closeup::{HaloCloseup, NoCloseup, StarCloseup};
pub use entry::{BaseStarEntry, ENTRY_SIZE, Rgb, StarPosition};
pub use error::{SaveFileError, StarDataError};
pub use markers::StarMarkers;
pub use range::{FRange, StarRanges};
pub use resources::ResourceDir;
pub use save_file::{SaveReader, SaveWriter};
pub use star_vector::StarVector;
pub use starfield::{DEFAULT_CATALOG_RESOURCE, StarField};
pub use surface::{PixelDepth, SurfaceArea};
pub use view::{SelectionHandler, StarMode, StarView};
pub use visitor::{PositionCollector, StarFinder, StarVisitor, VisibleCounter};

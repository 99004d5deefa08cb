/// FP3D Core Library - First-person camera and homogeneous transform math
///
/// This library provides the frontend-independent core: vectors, 4x4
/// matrices, the camera with its view matrices, and the world ↔ pixel
/// pipeline used for drawing and picking.
pub mod camera;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod input;
pub mod matrix;
pub mod projection;
pub mod scene;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use camera::{Basis, Camera, CameraIntrinsics, ViewSnapshot};
pub use config::ViewerConfig;
pub use controller::{FirstPersonController, TickInput};
pub use error::{CameraError, CameraResult, MathError, MathResult};
pub use geometry::Wireframe;
pub use input::{InputSource, Key};
pub use matrix::Matrix;
pub use projection::{Plane, PlaneHits, Projector, Ray, RayCast};
pub use scene::{Color, DrawStats, LineCanvas, Placed, Scene};
pub use transform::{SceneObject, Transformable};
pub use vector::{Vec2, Vec3, Vec4};

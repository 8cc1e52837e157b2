//! Editing layer
//!
//! Block instances, the session that owns them, the edit-view control
//! tree handed to a host UI, and the media picker contract.

pub mod instance;
pub mod media;
pub mod session;
pub mod view;

pub use instance::{BlockInstance, InstanceId};
pub use media::{ImageBinding, MediaAttachment};
pub use session::{EditorError, EditorSession};
pub use view::{EditNode, EditView, InspectorControl, InspectorPanel};

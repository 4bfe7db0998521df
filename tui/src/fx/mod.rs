pub(crate) mod backdrop;
pub(crate) mod ease;
pub(crate) mod glow;
pub(crate) mod particles;
pub(crate) mod reveal;

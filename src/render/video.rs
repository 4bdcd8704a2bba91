use crate::{
    foundation::{core::FrameSize, error::TintResult},
    frame::buffer::FrameRGBA,
};

/// A live video element: something that can report whether it is playing and
/// hand out its current frame.
pub trait VideoSource {
    /// Whether frames are advancing.
    fn is_playing(&self) -> bool;
    /// Size of the decoded video, zero before the first frame.
    fn native_size(&self) -> FrameSize;
    /// The frame currently on display, or `None` if nothing is decoded yet.
    fn current_frame(&mut self) -> TintResult<Option<FrameRGBA>>;
}

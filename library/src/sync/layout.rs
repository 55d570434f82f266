use uuid::Uuid;

/// Cosmetic repositioning hook, invoked after every structural change.
///
/// Fire-and-forget: no return value, not part of correctness. Hosts plug in
/// their own network-view layout here.
pub trait LayoutHint {
    fn container_changed(&self, container_id: Uuid);
}

/// Hint that only logs the request.
pub struct NullLayout;

impl LayoutHint for NullLayout {
    fn container_changed(&self, container_id: Uuid) {
        log::debug!("Layout refresh requested for container {}", container_id);
    }
}

/// The two-state function a gate wraps.
///
/// `on_transition(false)` must leave the gated condition inactive and
/// `on_transition(true)` must re-enable it. The gate may deliver `false`
/// more than once in a row, so implementors must tolerate repeats.
pub trait TransitionCallback {
    type Output;

    fn on_transition(&mut self, active: bool) -> Self::Output;
}

impl<F, R> TransitionCallback for F
where
    F: FnMut(bool) -> R,
{
    type Output = R;

    fn on_transition(&mut self, active: bool) -> R {
        self(active)
    }
}

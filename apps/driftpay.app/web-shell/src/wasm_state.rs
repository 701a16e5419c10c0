/// Send-surface state owned by the shell: submission progress and the
/// outcome line rendered under the form.
#[derive(Debug, Clone, Default)]
pub(crate) struct SendSurfaceState {
    pub(super) last_status: Option<String>,
    pub(super) last_error: Option<String>,
}

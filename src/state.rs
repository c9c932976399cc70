#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ControllerState {
    Stopped,  // Created, timer not armed yet
    Running,  // Timer armed, ticks advance the active slide
    Paused,   // Timer armed, ticks suspended (hover/focus)
    Disposed, // Torn down, accepts no further operations
}

impl ControllerState {
    pub fn is_terminal(self) -> bool {
        self == ControllerState::Disposed
    }
}

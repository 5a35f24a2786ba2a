/// Everything the input layer can ask of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveForward,
    MoveBack,
    StrafeLeft,
    StrafeRight,
    MoveUp,
    MoveDown,
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
    RollLeft,
    RollRight,
    Reset,
    /// Index into the depth-first list of bodies
    LookAt(usize),
    ToggleTimeAcceleration,
    ToggleOrbits,
    ToggleHelp,
    Quit,
}

impl Command {
    /// Camera motions repeat every frame while their key is held; everything
    /// else fires once per key press.
    pub fn is_continuous(&self) -> bool {
        use Command::*;
        matches!(
            self,
            MoveForward
                | MoveBack
                | StrafeLeft
                | StrafeRight
                | MoveUp
                | MoveDown
                | YawLeft
                | YawRight
                | PitchUp
                | PitchDown
                | RollLeft
                | RollRight
        )
    }
}

/// Source of a roll trigger. Shake and manual requests share one command
/// path so the in-flight guard lives in exactly one place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerSource {
    Shake,
    Manual,
}

impl TriggerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerSource::Shake => "shake",
            TriggerSource::Manual => "manual",
        }
    }
}

/// Command consumed by the roll state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollCommand {
    Trigger(TriggerSource),
    Reset,
}

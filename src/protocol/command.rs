//! Command names understood by the game process

use std::fmt;

/// A command issued by the engine, one per input line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    BuildMenu,
    BuildLevel,
    GetLevelCount,
    BuildRoom,
    FillObjects,
    SetBackground,
    UpdateAxis,
    UpdateButton,
    Exit,
}

impl Command {
    /// Every recognized command, in registration order
    pub const ALL: [Command; 9] = [
        Command::BuildMenu,
        Command::BuildLevel,
        Command::GetLevelCount,
        Command::BuildRoom,
        Command::FillObjects,
        Command::SetBackground,
        Command::UpdateAxis,
        Command::UpdateButton,
        Command::Exit,
    ];

    /// Wire name of the command
    pub fn name(&self) -> &'static str {
        match self {
            Command::BuildMenu => "build_menu",
            Command::BuildLevel => "build_level",
            Command::GetLevelCount => "get_level_count",
            Command::BuildRoom => "build_room",
            Command::FillObjects => "fill_objects",
            Command::SetBackground => "set_background",
            Command::UpdateAxis => "update_axis",
            Command::UpdateButton => "update_button",
            Command::Exit => "exit",
        }
    }

    /// Look up a command by its exact, case-sensitive wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|command| command.name() == name)
    }

    /// Number of argument tokens the command reads after its name
    pub fn arity(&self) -> usize {
        match self {
            Command::UpdateAxis | Command::UpdateButton => 3,
            _ => 0,
        }
    }

    pub fn takes_arguments(&self) -> bool {
        self.arity() > 0
    }

    /// Encode the command line as the engine writes it
    pub fn encode(&self) -> String {
        format!("{}\n", self.name())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_resolve_back() {
        for command in Command::ALL {
            assert_eq!(Command::from_name(command.name()), Some(command));
        }
    }

    #[test]
    fn test_match_is_exact() {
        assert_eq!(Command::from_name("EXIT"), None);
        assert_eq!(Command::from_name("exit "), None);
        assert_eq!(Command::from_name(" exit"), None);
        assert_eq!(Command::from_name(""), None);
    }

    #[test]
    fn test_argument_commands() {
        assert!(Command::UpdateAxis.takes_arguments());
        assert!(Command::UpdateButton.takes_arguments());
        assert!(!Command::BuildRoom.takes_arguments());
        assert_eq!(Command::UpdateAxis.arity(), 3);
        assert_eq!(Command::Exit.arity(), 0);
    }

    #[test]
    fn test_encode() {
        assert_eq!(Command::SetBackground.encode(), "set_background\n");
    }
}

//! Resolution after an EXECUTION phase.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEnd {
    /// Only wolves remain.
    WolfVictory,
    /// Wolves are alive and the turn limit has been reached.
    WolvesSurviveTurnLimit,
    /// Wolves are alive and turns remain; discuss again.
    Rediscussion,
    /// No wolf is alive.
    VillagerVictory,
}

impl TurnEnd {
    pub fn ends_game(&self) -> bool {
        !matches!(self, TurnEnd::Rediscussion)
    }

    pub fn result_message(&self) -> &'static str {
        match self {
            TurnEnd::WolfVictory => "Only wolves remain. The wolves win!",
            TurnEnd::WolvesSurviveTurnLimit => {
                "The wolves survived until the last turn. The wolves win!"
            }
            TurnEnd::VillagerVictory => "The wolf was executed. The villagers win!",
            TurnEnd::Rediscussion => "",
        }
    }
}

/// `executions` counts EXECUTION phases so far, the one just finished included.
pub fn resolve(living: usize, living_wolves: usize, executions: usize, max_turns: usize) -> TurnEnd {
    if living_wolves == 0 {
        TurnEnd::VillagerVictory
    } else if living_wolves == living {
        TurnEnd::WolfVictory
    } else if executions >= max_turns {
        TurnEnd::WolvesSurviveTurnLimit
    } else {
        TurnEnd::Rediscussion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wolves_equal_living_is_wolf_victory() {
        assert_eq!(resolve(1, 1, 1, 3), TurnEnd::WolfVictory);
        // wolf victory takes precedence over the turn limit
        assert_eq!(resolve(2, 2, 3, 3), TurnEnd::WolfVictory);
    }

    #[test]
    fn test_turn_limit_reached_with_wolf_alive() {
        assert_eq!(resolve(3, 1, 2, 2), TurnEnd::WolvesSurviveTurnLimit);
    }

    #[test]
    fn test_turns_remaining_means_rediscussion() {
        let end = resolve(3, 1, 1, 3);
        assert_eq!(end, TurnEnd::Rediscussion);
        assert!(!end.ends_game());
    }

    #[test]
    fn test_no_wolf_alive_is_villager_victory() {
        assert_eq!(resolve(2, 0, 1, 1), TurnEnd::VillagerVictory);
    }
}

//! The coach - a component with an injected fortune provider.

use crate::fortune::FortuneServicePtr;
use beanery_di::bean::BeanPtr;

/// Capability: a coach handing out a daily workout and a daily fortune.
pub trait Coach {
    fn daily_workout(&self) -> String;

    fn daily_fortune(&self) -> String;
}

impl std::fmt::Debug for dyn Coach + Send + Sync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Coach")
    }
}

pub type CoachPtr = BeanPtr<dyn Coach + Send + Sync>;

/// A coach delegating fortunes to exactly one injected [FortuneService]
/// (selected by qualifier when more than one is registered).
pub struct TennisCoach {
    fortune_service: FortuneServicePtr,
}

impl TennisCoach {
    pub fn new(fortune_service: FortuneServicePtr) -> Self {
        Self { fortune_service }
    }
}

impl Coach for TennisCoach {
    fn daily_workout(&self) -> String {
        "Practice your backhand volley".to_string()
    }

    fn daily_fortune(&self) -> String {
        self.fortune_service.fortune()
    }
}

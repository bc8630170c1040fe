use interview_core::model::{Category, Difficulty};

#[must_use]
pub fn difficulty_badge_class(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "badge badge--easy",
        Difficulty::Medium => "badge badge--medium",
        Difficulty::Hard => "badge badge--hard",
    }
}

#[must_use]
pub fn category_badge_class(category: Category) -> &'static str {
    match category {
        Category::Hr => "badge badge--hr",
        Category::Technical => "badge badge--technical",
        Category::Behavioral => "badge badge--behavioral",
    }
}

/// The countdown turns urgent in its last half minute.
#[must_use]
pub fn countdown_class(remaining: u32) -> &'static str {
    if remaining <= 30 {
        "practice-timer practice-timer--urgent"
    } else {
        "practice-timer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_turns_urgent_at_thirty_seconds() {
        assert_eq!(countdown_class(31), "practice-timer");
        assert_eq!(countdown_class(30), "practice-timer practice-timer--urgent");
        assert_eq!(countdown_class(0), "practice-timer practice-timer--urgent");
    }
}

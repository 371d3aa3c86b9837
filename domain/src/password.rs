//! Password strength scoring for the registration and change-password meters.

const MIN_LENGTH: usize = 8;
const STRONG_LENGTH: usize = 12;
const ACCEPTABLE_SCORE: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLevel {
    fn from_score(score: u8) -> Self {
        match score {
            0 => StrengthLevel::VeryWeak,
            1 => StrengthLevel::Weak,
            2 => StrengthLevel::Fair,
            3 => StrengthLevel::Good,
            _ => StrengthLevel::Strong,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StrengthLevel::VeryWeak => "Very weak",
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Fair => "Fair",
            StrengthLevel::Good => "Good",
            StrengthLevel::Strong => "Strong",
        }
    }

    /// CSS modifier for the meter bar
    pub fn css_class(&self) -> &'static str {
        match self {
            StrengthLevel::VeryWeak => "strength-very-weak",
            StrengthLevel::Weak => "strength-weak",
            StrengthLevel::Fair => "strength-fair",
            StrengthLevel::Good => "strength-good",
            StrengthLevel::Strong => "strength-strong",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PasswordStrength {
    /// 0 (worst) to 4 (best)
    pub score: u8,
    pub level: StrengthLevel,
    pub acceptable: bool,
    pub suggestions: Vec<String>,
}

impl PasswordStrength {
    /// Fill percentage for the meter bar
    pub fn percent(&self) -> u8 {
        self.score * 25
    }
}

pub fn evaluate_password(password: &str) -> PasswordStrength {
    let length = password.chars().count();
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace());
    let classes = [has_lower, has_upper, has_digit, has_symbol].iter().filter(|&&c| c).count();

    let mut score = 0u8;
    if length >= MIN_LENGTH {
        score += 1;
    }
    if length >= STRONG_LENGTH {
        score += 1;
    }
    if classes >= 3 {
        score += 1;
    }
    if classes == 4 {
        score += 1;
    }

    let mut suggestions = Vec::new();
    if length < MIN_LENGTH {
        suggestions.push(format!("Use at least {} characters", MIN_LENGTH));
    } else if length < STRONG_LENGTH {
        suggestions.push(format!("{} or more characters is stronger", STRONG_LENGTH));
    }
    if !has_upper {
        suggestions.push("Add an uppercase letter".to_string());
    }
    if !has_lower {
        suggestions.push("Add a lowercase letter".to_string());
    }
    if !has_digit {
        suggestions.push("Add a number".to_string());
    }
    if !has_symbol {
        suggestions.push("Add a symbol such as ! or #".to_string());
    }

    PasswordStrength {
        score,
        level: StrengthLevel::from_score(score),
        acceptable: score >= ACCEPTABLE_SCORE && length >= MIN_LENGTH,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password() {
        let strength = evaluate_password("");
        assert_eq!(strength.score, 0);
        assert_eq!(strength.level, StrengthLevel::VeryWeak);
        assert!(!strength.acceptable);
        assert_eq!(strength.percent(), 0);
    }

    #[test]
    fn test_common_password_not_acceptable() {
        let strength = evaluate_password("password");
        assert_eq!(strength.score, 1);
        assert_eq!(strength.level.label(), "Weak");
        assert!(!strength.acceptable);
        assert!(strength.suggestions.contains(&"Add a number".to_string()));
    }

    #[test]
    fn test_fair_password_is_acceptable() {
        let strength = evaluate_password("Summer2024");
        assert_eq!(strength.score, 2);
        assert!(strength.acceptable);
    }

    #[test]
    fn test_strong_password() {
        let strength = evaluate_password("C0rrect-Horse!");
        assert_eq!(strength.score, 4);
        assert_eq!(strength.level, StrengthLevel::Strong);
        assert!(strength.suggestions.is_empty());
        assert_eq!(strength.percent(), 100);
    }

    #[test]
    fn test_short_complex_password_is_rejected() {
        let strength = evaluate_password("aB3$");
        assert_eq!(strength.score, 2);
        assert!(!strength.acceptable);
    }
}

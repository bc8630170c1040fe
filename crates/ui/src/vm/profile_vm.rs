/// Up to two initials for the avatar fallback.
#[must_use]
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect();
    letters.chars().take(2).collect::<String>().to_uppercase()
}

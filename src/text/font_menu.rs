//! Splits a long list of font families into alphabetical buckets so the
//! picker stays usable on systems with hundreds of fonts.

/// Above this many names the list is bucketed.
pub const FLAT_LIMIT: usize = 20;
/// A bucket may close once it holds this many names...
const MIN_GROUP: usize = 12;
/// ...and more than this many names are still left.
const MIN_REMAINING: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontGroup {
    /// `"A"` or `"A to C"`.
    pub label: String,
    pub names: Vec<String>,
}

impl std::fmt::Display for FontGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontMenu {
    Flat(Vec<String>),
    Grouped(Vec<FontGroup>),
}

impl FontMenu {
    pub fn is_empty(&self) -> bool {
        match self {
            FontMenu::Flat(names) => names.is_empty(),
            FontMenu::Grouped(groups) => groups.is_empty(),
        }
    }
}

/// Buckets an alphabetically sorted list of names by first letter.
///
/// Letters are added to the current bucket one at a time; the bucket is closed
/// when the names run out, or when it holds at least 12 names and more than 4
/// remain. Names that sort after `Z` land in the last bucket.
pub fn group_font_names(names: &[String]) -> FontMenu {
    if names.len() <= FLAT_LIMIT {
        return FontMenu::Flat(names.to_vec());
    }

    let first_letter = |name: &str| name.chars().next().map(|c| c.to_ascii_uppercase()).unwrap_or('\0');

    let mut groups = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let (mut lo, mut hi) = ('A', 'A');
    let mut i = 0;

    while i < names.len() {
        while i < names.len() && (first_letter(&names[i]) <= hi || hi == 'Z') {
            current.push(names[i].clone());
            i += 1;
        }

        let done = i == names.len();
        if done || (current.len() >= MIN_GROUP && i + MIN_REMAINING < names.len()) {
            let label = if lo == hi {
                lo.to_string()
            } else {
                format!("{lo} to {hi}")
            };
            groups.push(FontGroup {
                label,
                names: std::mem::take(&mut current),
            });
            hi = next_letter(hi);
            lo = hi;
        } else {
            hi = next_letter(hi);
        }
    }

    FontMenu::Grouped(groups)
}

fn next_letter(c: char) -> char {
    char::from_u32(c as u32 + 1).unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(counts: &[(char, usize)]) -> Vec<String> {
        counts.iter()
            .flat_map(|&(letter, count)| (0..count).map(move |i| format!("{letter}font{i:02}")))
            .collect()
    }

    #[test]
    fn short_lists_stay_flat() {
        let list = names(&[('A', 10), ('Q', 10)]);
        assert_eq!(group_font_names(&list), FontMenu::Flat(list.clone()));
    }

    #[test]
    fn letters_accumulate_until_group_is_big_enough() {
        let list = names(&[('A', 5), ('B', 5), ('C', 5), ('D', 5), ('E', 5), ('F', 5)]);
        let FontMenu::Grouped(groups) = group_font_names(&list) else {
            panic!("expected groups");
        };
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["A to C", "D to F"]);
        assert_eq!(groups[0].names.len(), 15);
        assert_eq!(groups[1].names.len(), 15);
    }

    #[test]
    fn single_letter_groups_get_single_letter_labels() {
        let list = names(&[('A', 13), ('B', 10)]);
        let FontMenu::Grouped(groups) = group_font_names(&list) else {
            panic!("expected groups");
        };
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
    }

    #[test]
    fn small_tail_is_folded_into_previous_group() {
        // After A only 4 names remain, so A does not close on its own.
        let list = names(&[('A', 17), ('B', 4)]);
        let FontMenu::Grouped(groups) = group_font_names(&list) else {
            panic!("expected groups");
        };
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "A to B");
        assert_eq!(groups[0].names.len(), 21);
    }

    #[test]
    fn everything_after_z_joins_the_last_group() {
        let mut list = names(&[('A', 12), ('M', 6), ('Z', 2)]);
        list.push("ßfont".to_string());
        list.push("ŽFont".to_string());
        let FontMenu::Grouped(groups) = group_font_names(&list) else {
            panic!("expected groups");
        };
        let last = groups.last().expect("at least one group");
        assert!(last.label.ends_with('Z'));
        assert!(last.names.iter().any(|n| n == "ŽFont"));
        let total: usize = groups.iter().map(|g| g.names.len()).sum();
        assert_eq!(total, list.len());
    }
}

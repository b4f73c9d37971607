//! Sheet-level rendering: counters grouped under category headings.

use std::collections::BTreeMap;

use crate::entities::Counter;
use crate::value_objects::RenderOptions;

/// Render `counters` grouped by category.
///
/// Groups appear in [`CounterCategory::CANONICAL_ORDER`](crate::CounterCategory::CANONICAL_ORDER)
/// under a bold heading, separated by a blank line. Within a group counters are
/// sorted by case-insensitive name. Empty input renders as an empty string.
pub fn render_counters<'a, I, F>(counters: I, unescape: F, options: RenderOptions) -> String
where
    I: IntoIterator<Item = &'a Counter>,
    F: Fn(&str) -> String,
{
    let mut groups: BTreeMap<usize, Vec<&Counter>> = BTreeMap::new();
    for counter in counters {
        groups
            .entry(counter.category().rank())
            .or_default()
            .push(counter);
    }

    groups
        .into_values()
        .filter_map(|mut group| {
            group.sort_by_cached_key(|c| c.name().to_lowercase());
            let heading = group.first()?.category().display_name();
            let blocks: Vec<String> = group
                .iter()
                .map(|c| c.render(&unescape, options))
                .collect();
            Some(format!("**{heading}**\n{}", blocks.join("\n")))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{keep_escaped, unescape_markdown};
    use crate::value_objects::{CounterCategory, CounterVariant};

    fn counter(name: &str, temp: i64, perm: i64, category: CounterCategory) -> Counter {
        Counter::builder(name, temp, perm, category)
            .build()
            .expect("valid counter")
    }

    #[test]
    fn groups_follow_canonical_order() {
        let counters = vec![
            counter("Willpower", 5, 10, CounterCategory::Tempers),
            counter("Glory", 3, 5, CounterCategory::Reknown),
        ];
        let rendered = render_counters(&counters, keep_escaped, RenderOptions::plain());

        assert_eq!(
            rendered,
            "**Tempers**\nWillpower:\n5/10\n\n**Reknown**\nGlory:\n3/5"
        );
    }

    #[test]
    fn input_order_does_not_matter() {
        let counters = vec![
            counter("Wand", 2, 2, CounterCategory::Items),
            counter("Glory", 3, 5, CounterCategory::Reknown),
            counter("Oddity", 1, 1, CounterCategory::Other),
            counter("Willpower", 5, 10, CounterCategory::Tempers),
        ];
        let rendered = render_counters(&counters, keep_escaped, RenderOptions::plain());

        let positions: Vec<usize> = ["**Tempers**", "**Reknown**", "**Items**", "**Other**"]
            .iter()
            .map(|heading| rendered.find(heading).expect("heading present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn counters_sorted_by_name_ignoring_case() {
        let counters = vec![
            counter("rage", 1, 1, CounterCategory::Tempers),
            counter("Banality", 1, 1, CounterCategory::Tempers),
            counter("gnosis", 1, 1, CounterCategory::Tempers),
        ];
        let rendered = render_counters(&counters, keep_escaped, RenderOptions::plain());

        assert_eq!(
            rendered,
            "**Tempers**\nBanality:\n1/1\ngnosis:\n1/1\nrage:\n1/1"
        );
    }

    #[test]
    fn comments_follow_their_counter() {
        let mut willpower = Counter::builder("Willpower", 2, 4, CounterCategory::Tempers)
            .variant(CounterVariant::PermIsMaximum)
            .build()
            .expect("valid");
        willpower.set_comment(Some("\\*spent\\* on a frenzy check".to_string()));
        let rage = counter("Rage", 1, 1, CounterCategory::Tempers);

        let rendered = render_counters(
            [&rage, &willpower],
            unescape_markdown,
            RenderOptions::plain(),
        );
        assert_eq!(
            rendered,
            "**Tempers**\nRage:\n1/1\nWillpower:\n2/4\n-# *spent* on a frenzy check"
        );
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(
            render_counters(&Vec::<Counter>::new(), keep_escaped, RenderOptions::plain()),
            ""
        );
    }
}

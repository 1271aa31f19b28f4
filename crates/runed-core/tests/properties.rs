//! Property tests for the line store and cursor math.

use proptest::prelude::*;
use runed_core::{DataX, Editor, Indentation, Settings};

fn editor(text: &str, per_tab: usize) -> Editor {
    let settings = Settings {
        indentation: Indentation::tabs(per_tab),
        ..Settings::default()
    };
    Editor::from_text(text, settings)
}

fn line() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![(b'a'..=b'z').prop_map(char::from), Just(' '), Just('\t')],
        0..12,
    )
    .prop_map(|runes| runes.into_iter().collect())
}

fn document() -> impl Strategy<Value = String> {
    (prop::collection::vec(line(), 0..8), "[a-z]{1,6}").prop_map(|(mut lines, last)| {
        lines.push(last);
        lines.join("\n")
    })
}

#[derive(Debug, Clone)]
enum Op {
    Insert(char),
    Delete,
    Split,
    Join,
    LineBelow,
    LineAbove,
    DeleteLine(usize),
    Next,
    Prev,
    Down,
    Up,
    Wrap(usize),
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            prop_oneof![Just('x'), Just(' '), Just('\t'), Just('é')].prop_map(Op::Insert),
            Just(Op::Delete),
            Just(Op::Split),
            Just(Op::Join),
            Just(Op::LineBelow),
            Just(Op::LineAbove),
            (0usize..12).prop_map(Op::DeleteLine),
            Just(Op::Next),
            Just(Op::Prev),
            Just(Op::Down),
            Just(Op::Up),
            (0usize..8).prop_map(Op::Wrap),
        ],
        0..40,
    )
}

fn apply(e: &mut Editor, op: &Op) {
    match *op {
        Op::Insert(r) => {
            e.insert_rune(r);
        }
        Op::Delete => e.delete(),
        Op::Split => {
            e.split_line();
        }
        Op::Join => {
            e.join_line_with_next(None);
        }
        Op::LineBelow => e.insert_line_below(),
        Op::LineAbove => e.insert_line_above(),
        Op::DeleteLine(n) => e.delete_line(n),
        Op::Next => {
            let _ = e.next();
        }
        Op::Prev => {
            let _ = e.prev();
        }
        Op::Down => {
            let _ = e.down_end();
        }
        Op::Up => {
            let _ = e.up_end();
        }
        Op::Wrap(width) => {
            e.wrap_now(width);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 200, ..ProptestConfig::default() })]

    #[test]
    fn prop_store_stays_dense(text in document(), ops in ops()) {
        let mut e = editor(&text, 4);
        for op in &ops {
            apply(&mut e, op);
            let store = e.store();
            for y in 0..store.len() {
                prop_assert!(store.contains(y), "hole at {} after {:?}", y, op);
            }
            prop_assert!(!store.contains(store.len()));
        }
    }

    #[test]
    fn prop_text_round_trips(text in document()) {
        let e = editor(&text, 4);
        prop_assert_eq!(e.text(), text.clone());
        prop_assert_eq!(e.len(), text.split('\n').count());
    }

    #[test]
    fn prop_typed_runes_read_back(
        runes in prop::collection::vec(
            prop_oneof![
                (b'a'..=b'z').prop_map(char::from),
                Just('\t'),
                Just('é'),
                Just('漢'),
                Just('🦀'),
            ],
            1..30,
        ),
        per_tab in 1usize..9,
    ) {
        let mut e = editor("", per_tab);
        let typed: String = runes.iter().collect();
        e.insert_string(&typed);
        prop_assert_eq!(e.len(), 1);

        e.home();
        let mut read = Vec::new();
        for _ in 0..runes.len() {
            let (x, y) = e.data_position();
            let x = x.found();
            prop_assert!(x.is_some());
            read.extend(x.and_then(|x| e.rune_at(x, y)));
            let _ = e.next();
        }
        prop_assert_eq!(read, runes);
        prop_assert!(e.data_x().is_after_content());
    }

    #[test]
    fn prop_tab_prefix_column_math(
        tabs in 0usize..6,
        rest in 1usize..10,
        k in 0usize..12,
        per_tab in 1usize..9,
    ) {
        let line = format!("{}{}", "\t".repeat(tabs), "x".repeat(rest));
        let mut e = editor(&line, per_tab);
        let k = k.min(rest);
        prop_assert_eq!(e.screen_column_of(tabs + k, 0), tabs * per_tab + k);

        e.go_to_line_and_column(0, tabs + k);
        prop_assert_eq!(e.position().column(), tabs * per_tab + k);
        let expected = if k < rest {
            DataX::Found(tabs + k)
        } else {
            DataX::AfterContent(tabs + rest)
        };
        prop_assert_eq!(e.data_x(), expected);
    }

    #[test]
    fn prop_padding_is_idempotent(
        text in document(),
        x in 0usize..30,
        shorter in 0usize..30,
        y in 0usize..12,
    ) {
        let mut e = editor(&text, 4);
        let before = e.line_runes(y).to_vec();
        e.set_at(x, y, '#');
        let once = e.text();
        let len = before.len().max(x + 1);
        prop_assert_eq!(e.line_runes(y).len(), len);
        prop_assert_eq!(e.rune_at(x, y), Some('#'));
        for i in before.len()..x {
            prop_assert_eq!(e.rune_at(i, y), Some(' '));
        }
        e.set_at(x, y, '#');
        prop_assert_eq!(e.text(), once);

        let shorter = shorter % (x + 1);
        e.set_at(shorter, y, '@');
        prop_assert_eq!(e.line_runes(y).len(), len);
        for i in before.len()..x {
            if i != shorter {
                prop_assert_eq!(e.rune_at(i, y), Some(' '));
            }
        }
    }
}

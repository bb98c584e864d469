//! Property-based tests for the resolution walk and stack parsing.

use excat_catalog::Catalog;
use excat_resolve::{frame_from_symbol, parse_stack, resolve};
use excat_types::Frame;
use proptest::prelude::*;

fn frame_strategy() -> impl Strategy<Value = Frame> {
    ("[A-Z][a-z]{0,3}", "[a-z]{1,4}", prop::option::of(1u32..500))
        .prop_map(|(class, method, line)| Frame::new(class, method, line))
}

proptest! {
    #[test]
    fn located_frame_is_the_first_with_an_entry(
        stack in prop::collection::vec(frame_strategy(), 1..8),
        pick in prop::collection::vec(any::<bool>(), 8),
    ) {
        let mut catalog = Catalog::in_memory();
        for (frame, chosen) in stack.iter().zip(&pick) {
            if *chosen {
                catalog.set(frame.key().as_str(), &format!("msg {}", frame.key()));
            }
        }

        let resolved = resolve(&stack, &catalog);
        let expected = stack.iter().find(|f| catalog.contains(f.key().as_str()));

        match expected {
            Some(frame) => {
                prop_assert_eq!(resolved.frame().map(Frame::key), Some(frame.key()));
                let message = format!("msg {}", frame.key());
                prop_assert_eq!(resolved.message(), message.as_str());
            }
            None => {
                prop_assert_eq!(resolved.frame(), stack.first());
                prop_assert_eq!(resolved.message(), "");
            }
        }
    }

    #[test]
    fn debug_off_renders_exactly_the_message(stack in prop::collection::vec(frame_strategy(), 0..5)) {
        let catalog = Catalog::from_text("DEBUG=false\ndefaultMessage=Fallback\n");
        let resolved = resolve(&stack, &catalog);
        prop_assert_eq!(resolved.to_string(), "Fallback");
    }

    #[test]
    fn rust_paths_split_on_the_last_separator(
        path in prop::collection::vec("[a-z_][a-z0-9_]{0,6}", 2..6),
    ) {
        let symbol = path.join("::");
        let frame = frame_from_symbol(&symbol, None).unwrap();
        prop_assert_eq!(&frame.method_name, path.last().unwrap());
        prop_assert_eq!(frame.class_name, path[..path.len() - 1].join("::"));
    }

    #[test]
    fn parse_stack_never_panics(text in "\\PC{0,200}") {
        let _ = parse_stack(&text);
    }
}

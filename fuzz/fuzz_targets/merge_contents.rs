#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use melonlink_edit::{Anchor, MergeRequest, merge_contents, remove_generated_contents};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    src: &'a str,
    anchor: &'a str,
    fragment: &'a str,
    indent: u8,
    hash_comment: bool,
}

fuzz_target!(|input: Input<'_>| {
    // Inputs that already carry markers can fence the block arbitrarily.
    if input.anchor.is_empty() || input.src.contains("@generated") || input.fragment.contains("@generated") {
        return;
    }
    let comment = if input.hash_comment { "#" } else { "//" };
    let req = MergeRequest::new("@fuzz/tag", input.fragment, Anchor::literal(input.anchor))
        .comment(comment)
        .indent(usize::from(input.indent % 16));

    let Ok(once) = merge_contents(input.src, &req) else { return };

    // A second merge must never fail or change the text.
    let twice = merge_contents(&once.contents, &req).expect("anchor survives merge");
    assert_eq!(once.contents, twice.contents);

    let _ = remove_generated_contents(&once.contents, comment, "@fuzz/tag");
});

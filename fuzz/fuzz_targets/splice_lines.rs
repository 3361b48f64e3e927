#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use melonlink_edit::{LinePredicate, SpliceRequest, splice_block, splice_lines, split_lines};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    src: &'a str,
    needle: &'a str,
    fragment: &'a str,
    offset: u8,
    exact: bool,
}

fuzz_target!(|input: Input<'_>| {
    let (lines, _) = split_lines(input.src);
    let predicate = if input.exact {
        LinePredicate::Exact(input.needle.to_string())
    } else {
        LinePredicate::Contains(input.needle.to_string())
    };
    let offset = usize::from(input.offset);

    if let Ok(out) = splice_lines(&lines, &predicate, input.fragment, offset) {
        assert_eq!(out.len(), lines.len() + 1);
    }

    let req = SpliceRequest::new("@fuzz/splice", input.fragment, predicate, offset);
    let _ = splice_block(&lines, &req);
});

#![no_main]
use libfuzzer_sys::fuzz_target;
use mdview::{extract_title, Token};

fuzz_target!(|tokens: Vec<Token>| {
    let title = extract_title(&tokens);
    assert_eq!(title, title.trim());
});

#![no_main]
use libfuzzer_sys::arbitrary::{self, Arbitrary};
use libfuzzer_sys::fuzz_target;
use mdview::{render, RenderOptions, Style};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    markdown: &'a str,
    bare: bool,
    dark: bool,
    xhtml: bool,
}

fuzz_target!(|input: Input| {
    let options = RenderOptions {
        style: Style::from_flags(input.bare, input.dark),
        xhtml: input.xhtml,
    };
    let page = render(input.markdown, &options).unwrap();
    assert_eq!(page.title(), page.title().trim());
    assert_eq!(page.materialize(), page.materialize());
});

//! End-to-end decode tests driven entirely through the public API:
//! build a dictionary and a page-stream byte vector by hand, then check
//! the resulting [`topaz_xml::Document`].

use topaz_xml::parser::PageParser;
use topaz_xml::tag::{Arg, ArgType};
use topaz_xml::varint::encode_varint;
use topaz_xml::Dictionary;

fn dict(strings: &[&str]) -> Dictionary {
    let mut buf = encode_varint(strings.len() as i64);
    for s in strings {
        buf.extend(encode_varint(s.len() as i64));
        buf.extend(s.as_bytes());
    }
    Dictionary::load(&buf).unwrap()
}

#[test]
fn prologue_marker_variant() {
    let mut data = b"pXmarker_".to_vec();
    data.push(0x00); // info's ntags = 0
    let d = dict(&[]);
    let doc = PageParser::new(&data, &d).process().unwrap();

    assert_eq!(doc.roots.len(), 1);
    assert_eq!(doc.roots[0].name, "info");
    assert!(doc.roots[0].children.is_empty());
    assert!(doc.roots[0].args.is_empty());
}

#[test]
fn prologue_page_variant() {
    let mut data = b"pX__PAGE_".to_vec();
    data.extend([0xAA, 0xBB]); // two bytes consumed and ignored
    data.push(0x00); // info's ntags = 0
    let d = dict(&[]);
    let doc = PageParser::new(&data, &d).process().unwrap();

    assert_eq!(doc.roots.len(), 1);
    assert_eq!(doc.roots[0].name, "info");
}

#[test]
fn prologue_short_page_variant_ignores_ninth_byte() {
    // Only 8 of the 9 magic bytes are actually matched; the 9th is
    // still consumed. Put something unrelated there to prove it.
    let mut data = vec![b'p', b'Y', b'_', b'P', b'A', b'G', b'E', b'_', b'Z'];
    data.push(0x00); // info's ntags = 0
    let d = dict(&[]);
    let doc = PageParser::new(&data, &d).process().unwrap();

    assert_eq!(doc.roots.len(), 1);
    assert_eq!(doc.roots[0].name, "info");
}

#[test]
fn prologue_glyph_variant() {
    let mut data = b"gX__GLYPH".to_vec();
    data.extend([0x11, 0x22, 0x33]); // three bytes consumed and ignored
    data.push(0x00); // info's ntags = 0
    let d = dict(&[]);
    let doc = PageParser::new(&data, &d).process().unwrap();

    assert_eq!(doc.roots.len(), 1);
    assert_eq!(doc.roots[0].name, "info");
}

#[test]
fn no_prologue_falls_through_to_main_loop() {
    // Fewer than 9 bytes total, so no magic can match; the first
    // VarInt is read as an ordinary dictionary-indexed tag instead.
    let d = dict(&["unused0", "type"]);
    let data = vec![0x01, 0x00]; // dict index 1 ("type"), then its scalar_text arg (index 0)
    let doc = PageParser::new(&data, &d).process().unwrap();

    assert_eq!(doc.roots.len(), 1);
    let tag = &doc.roots[0];
    assert_eq!(tag.name, "type");
    assert_eq!(tag.arg_type, ArgType::ScalarText);
    assert_eq!(tag.args, vec![Arg::Text("unused0".to_string())]);
}

#[test]
fn unknown_main_loop_value_is_tolerated_not_fatal() {
    let d = dict(&["x"]);
    let data = encode_varint(500); // not the snippet command, not a valid dict index
    let doc = PageParser::new(&data, &d).process().unwrap();
    assert!(doc.roots.is_empty());
}

#[test]
fn out_of_range_dictionary_index_is_fatal() {
    let d = dict(&["onlyone"]);
    let mut data = Vec::new();
    data.push(0x72); // snippet table command
    data.push(0x01); // one entry
    data.push(0x05); // dictionary index 5, out of range for a 1-entry dict
    let err = PageParser::new(&data, &d).process().unwrap_err();
    assert!(matches!(
        err,
        topaz_xml::Error::DictionaryIndexOutOfRange { index: 5, size: 1 }
    ));
}

// S6: the snippet table holds `group`, which references `region` by
// index; only `snippets[0]` is ever resolved and spliced into the
// document, depth-first, with every injected name prefixed by its
// parent's.
#[test]
fn snippet_injection_splices_referenced_subtree() {
    let d = dict(&["group", "region"]);
    let mut data = Vec::new();
    data.push(0x72); // snippet table command
    data.push(0x02); // two snippet entries

    data.push(0x00); // dict index 0: "group"
    data.push(0x00); // group's ntags = 0
    data.push(0x01); // group's snippets arg = 1 (refers to snippet 1)

    data.push(0x01); // dict index 1: "region"
    data.push(0x00); // region's ntags = 0
    data.push(0x63); // region's snippets arg = 99 (no such snippet, ignored)

    let doc = PageParser::new(&data, &d).process().unwrap();

    assert_eq!(doc.roots.len(), 1);
    let root = &doc.roots[0];
    assert_eq!(root.name, "group");
    assert!(root.args.is_empty());
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].name, "group.region");
    assert!(root.children[0].children.is_empty());
    assert!(root.children[0].args.is_empty());
}

#[test]
fn empty_stream_yields_empty_document() {
    let d = dict(&[]);
    let doc = PageParser::new(&[], &d).process().unwrap();
    assert!(doc.roots.is_empty());
}

//! The static tag schema table.
//!
//! Maps a dotted tag path to `(num_args, arg_type, has_subtags,
//! special_subtag_escape)`. This table was reverse-engineered by trial
//! and error against real Topaz documents; it may still have omissions.
//! Linear scan by path-prefix is fine given the small depth of real
//! documents (see the lookup helper below).

use crate::error::Result;
use crate::tag::ArgType;

#[derive(Copy, Clone, Debug)]
pub struct SchemaEntry {
    pub num_args: u8,
    pub arg_type_str: &'static str,
    pub has_subtags: bool,
    pub special_subtag_escape: bool,
}

impl SchemaEntry {
    pub fn arg_type(&self) -> Result<ArgType> {
        ArgType::from_str(self.arg_type_str)
    }
}

macro_rules! entry {
    ($args:expr, $ty:expr, $subtags:expr, $splcase:expr) => {
        SchemaEntry {
            num_args: $args,
            arg_type_str: $ty,
            has_subtags: $subtags,
            special_subtag_escape: $splcase,
        }
    };
}

/// The schema table, in declaration order. `paragraph.lastWord` is
/// intentionally listed twice -- that duplication exists in the original
/// reverse-engineered table and is harmless, since lookup takes the
/// first match.
pub static TOKEN_TAGS: &[(&str, SchemaEntry)] = &[
    ("x", entry!(1, "scalar_number", false, false)),
    ("y", entry!(1, "scalar_number", false, false)),
    ("h", entry!(1, "scalar_number", false, false)),
    ("w", entry!(1, "scalar_number", false, false)),
    ("firstWord", entry!(1, "scalar_number", false, false)),
    ("lastWord", entry!(1, "scalar_number", false, false)),
    ("rootID", entry!(1, "scalar_number", false, false)),
    ("stemID", entry!(1, "scalar_number", false, false)),
    ("type", entry!(1, "scalar_text", false, false)),
    ("info", entry!(0, "number", true, false)),
    ("info.word", entry!(0, "number", true, true)),
    ("info.word.ocrText", entry!(1, "text", false, false)),
    ("info.word.firstGlyph", entry!(1, "raw", false, false)),
    ("info.word.lastGlyph", entry!(1, "raw", false, false)),
    ("info.word.bl", entry!(1, "raw", false, false)),
    ("info.word.link_id", entry!(1, "number", false, false)),
    ("glyph", entry!(0, "number", true, true)),
    ("glyph.x", entry!(1, "number", false, false)),
    ("glyph.y", entry!(1, "number", false, false)),
    ("glyph.glyphID", entry!(1, "number", false, false)),
    ("dehyphen", entry!(0, "number", true, true)),
    ("dehyphen.rootID", entry!(1, "number", false, false)),
    ("dehyphen.stemID", entry!(1, "number", false, false)),
    ("dehyphen.stemPage", entry!(1, "number", false, false)),
    ("dehyphen.sh", entry!(1, "number", false, false)),
    ("links", entry!(0, "number", true, true)),
    ("links.page", entry!(1, "number", false, false)),
    ("links.rel", entry!(1, "number", false, false)),
    ("links.row", entry!(1, "number", false, false)),
    ("links.title", entry!(1, "text", false, false)),
    ("links.href", entry!(1, "text", false, false)),
    ("links.type", entry!(1, "text", false, false)),
    ("links.id", entry!(1, "number", false, false)),
    ("paraCont", entry!(0, "number", true, true)),
    ("paraCont.rootID", entry!(1, "number", false, false)),
    ("paraCont.stemID", entry!(1, "number", false, false)),
    ("paraCont.stemPage", entry!(1, "number", false, false)),
    ("paraStems", entry!(0, "number", true, true)),
    ("paraStems.stemID", entry!(1, "number", false, false)),
    ("wordStems", entry!(0, "number", true, true)),
    ("wordStems.stemID", entry!(1, "number", false, false)),
    ("empty", entry!(1, "snippets", true, false)),
    ("page", entry!(1, "snippets", true, false)),
    ("page.class", entry!(1, "scalar_text", false, false)),
    ("page.pageid", entry!(1, "scalar_text", false, false)),
    ("page.pagelabel", entry!(1, "scalar_text", false, false)),
    ("page.type", entry!(1, "scalar_text", false, false)),
    ("page.h", entry!(1, "scalar_number", false, false)),
    ("page.w", entry!(1, "scalar_number", false, false)),
    ("page.startID", entry!(1, "scalar_number", false, false)),
    ("group", entry!(1, "snippets", true, false)),
    ("group.class", entry!(1, "scalar_text", false, false)),
    ("group.type", entry!(1, "scalar_text", false, false)),
    ("group._tag", entry!(1, "scalar_text", false, false)),
    ("group.orientation", entry!(1, "scalar_text", false, false)),
    ("region", entry!(1, "snippets", true, false)),
    ("region.class", entry!(1, "scalar_text", false, false)),
    ("region.type", entry!(1, "scalar_text", false, false)),
    ("region.x", entry!(1, "scalar_number", false, false)),
    ("region.y", entry!(1, "scalar_number", false, false)),
    ("region.h", entry!(1, "scalar_number", false, false)),
    ("region.w", entry!(1, "scalar_number", false, false)),
    ("region.orientation", entry!(1, "scalar_text", false, false)),
    ("empty_text_region", entry!(1, "snippets", true, false)),
    ("img", entry!(1, "snippets", true, false)),
    ("img.x", entry!(1, "scalar_number", false, false)),
    ("img.y", entry!(1, "scalar_number", false, false)),
    ("img.h", entry!(1, "scalar_number", false, false)),
    ("img.w", entry!(1, "scalar_number", false, false)),
    ("img.src", entry!(1, "scalar_number", false, false)),
    ("img.color_src", entry!(1, "scalar_number", false, false)),
    ("paragraph", entry!(1, "snippets", true, false)),
    ("paragraph.class", entry!(1, "scalar_text", false, false)),
    ("paragraph.firstWord", entry!(1, "scalar_number", false, false)),
    ("paragraph.lastWord", entry!(1, "scalar_number", false, false)),
    ("paragraph.lastWord", entry!(1, "scalar_number", false, false)),
    ("paragraph.gridSize", entry!(1, "scalar_number", false, false)),
    (
        "paragraph.gridBottomCenter",
        entry!(1, "scalar_number", false, false),
    ),
    ("paragraph.gridTopCenter", entry!(1, "scalar_number", false, false)),
    (
        "paragraph.gridBeginCenter",
        entry!(1, "scalar_number", false, false),
    ),
    ("paragraph.gridEndCenter", entry!(1, "scalar_number", false, false)),
    ("word_semantic", entry!(1, "snippets", true, true)),
    ("word_semantic.type", entry!(1, "scalar_text", false, false)),
    ("word_semantic.class", entry!(1, "scalar_text", false, false)),
    (
        "word_semantic.firstWord",
        entry!(1, "scalar_number", false, false),
    ),
    ("word_semantic.lastWord", entry!(1, "scalar_number", false, false)),
    ("word", entry!(1, "snippets", true, false)),
    ("word.type", entry!(1, "scalar_text", false, false)),
    ("word.class", entry!(1, "scalar_text", false, false)),
    ("word.firstGlyph", entry!(1, "scalar_number", false, false)),
    ("word.lastGlyph", entry!(1, "scalar_number", false, false)),
    ("_span", entry!(1, "snippets", true, false)),
    ("_span.class", entry!(1, "scalar_text", false, false)),
    ("_span.firstWord", entry!(1, "scalar_number", false, false)),
    ("_span.lastWord", entry!(1, "scalar_number", false, false)),
    ("_span.gridSize", entry!(1, "scalar_number", false, false)),
    ("_span.gridBottomCenter", entry!(1, "scalar_number", false, false)),
    ("_span.gridTopCenter", entry!(1, "scalar_number", false, false)),
    ("_span.gridBeginCenter", entry!(1, "scalar_number", false, false)),
    ("_span.gridEndCenter", entry!(1, "scalar_number", false, false)),
    ("span", entry!(1, "snippets", true, false)),
    ("span.firstWord", entry!(1, "scalar_number", false, false)),
    ("span.lastWord", entry!(1, "scalar_number", false, false)),
    ("span.gridSize", entry!(1, "scalar_number", false, false)),
    ("span.gridBottomCenter", entry!(1, "scalar_number", false, false)),
    ("span.gridTopCenter", entry!(1, "scalar_number", false, false)),
    ("span.gridBeginCenter", entry!(1, "scalar_number", false, false)),
    ("span.gridEndCenter", entry!(1, "scalar_number", false, false)),
    ("extratokens", entry!(1, "snippets", true, false)),
    ("extratokens.type", entry!(1, "scalar_text", false, false)),
    ("extratokens.firstGlyph", entry!(1, "scalar_number", false, false)),
    ("extratokens.lastGlyph", entry!(1, "scalar_number", false, false)),
    ("glyph.h", entry!(1, "number", false, false)),
    ("glyph.w", entry!(1, "number", false, false)),
    ("glyph.use", entry!(1, "number", false, false)),
    ("glyph.vtx", entry!(1, "number", false, true)),
    ("glyph.len", entry!(1, "number", false, true)),
    ("glyph.dpi", entry!(1, "number", false, false)),
    ("vtx", entry!(0, "number", true, true)),
    ("vtx.x", entry!(1, "number", false, false)),
    ("vtx.y", entry!(1, "number", false, false)),
    ("len", entry!(0, "number", true, true)),
    ("len.n", entry!(1, "number", false, false)),
    ("book", entry!(1, "snippets", true, false)),
    ("version", entry!(1, "snippets", true, false)),
    ("version.FlowEdit_1_id", entry!(1, "scalar_text", false, false)),
    ("version.FlowEdit_1_version", entry!(1, "scalar_text", false, false)),
    ("version.Schema_id", entry!(1, "scalar_text", false, false)),
    ("version.Schema_version", entry!(1, "scalar_text", false, false)),
    ("version.Topaz_version", entry!(1, "scalar_text", false, false)),
    (
        "version.WordDetailEdit_1_id",
        entry!(1, "scalar_text", false, false),
    ),
    (
        "version.WordDetailEdit_1_version",
        entry!(1, "scalar_text", false, false),
    ),
    ("version.ZoneEdit_1_id", entry!(1, "scalar_text", false, false)),
    ("version.ZoneEdit_1_version", entry!(1, "scalar_text", false, false)),
    ("version.chapterheaders", entry!(1, "scalar_text", false, false)),
    ("version.creation_date", entry!(1, "scalar_text", false, false)),
    ("version.header_footer", entry!(1, "scalar_text", false, false)),
    ("version.init_from_ocr", entry!(1, "scalar_text", false, false)),
    ("version.letter_insertion", entry!(1, "scalar_text", false, false)),
    ("version.xmlinj_convert", entry!(1, "scalar_text", false, false)),
    ("version.xmlinj_reflow", entry!(1, "scalar_text", false, false)),
    ("version.xmlinj_transform", entry!(1, "scalar_text", false, false)),
    ("version.findlists", entry!(1, "scalar_text", false, false)),
    ("version.page_num", entry!(1, "scalar_text", false, false)),
    ("version.page_type", entry!(1, "scalar_text", false, false)),
    ("version.bad_text", entry!(1, "scalar_text", false, false)),
    ("version.glyph_mismatch", entry!(1, "scalar_text", false, false)),
    ("version.margins", entry!(1, "scalar_text", false, false)),
    ("version.staggered_lines", entry!(1, "scalar_text", false, false)),
    (
        "version.paragraph_continuation",
        entry!(1, "scalar_text", false, false),
    ),
    ("version.toc", entry!(1, "scalar_text", false, false)),
    ("stylesheet", entry!(1, "snippets", true, false)),
    ("style", entry!(1, "snippets", true, false)),
    ("style._tag", entry!(1, "scalar_text", false, false)),
    ("style.type", entry!(1, "scalar_text", false, false)),
    ("style._after_type", entry!(1, "scalar_text", false, false)),
    ("style._parent_type", entry!(1, "scalar_text", false, false)),
    ("style._after_parent_type", entry!(1, "scalar_text", false, false)),
    ("style.class", entry!(1, "scalar_text", false, false)),
    ("style._after_class", entry!(1, "scalar_text", false, false)),
    ("rule", entry!(1, "snippets", true, false)),
    ("rule.attr", entry!(1, "scalar_text", false, false)),
    ("rule.value", entry!(1, "scalar_text", false, false)),
    ("original", entry!(0, "number", true, true)),
    ("original.pnum", entry!(1, "number", false, false)),
    ("original.pid", entry!(1, "text", false, false)),
    ("pages", entry!(0, "number", true, true)),
    ("pages.ref", entry!(1, "number", false, false)),
    ("pages.id", entry!(1, "number", false, false)),
    ("startID", entry!(0, "number", true, true)),
    ("startID.page", entry!(1, "number", false, false)),
    ("startID.id", entry!(1, "number", false, false)),
];

/// Finds the schema entry for the tag path formed by `segments`. Tries
/// the full dotted path first, then progressively drops leading
/// (ancestor) segments until only the tag's own name is left, returning
/// the first match. This makes the schema sensitive both to
/// disambiguated full paths (e.g. `glyph.x`) and to short, context-free
/// names (e.g. `x`).
pub fn lookup<'a>(segments: &[&str]) -> Option<&'static SchemaEntry> {
    for start in 0..segments.len() {
        let joined = segments[start..].join(".");
        if let Some((_, entry)) = TOKEN_TAGS.iter().find(|(path, _)| *path == joined) {
            return Some(entry);
        }
    }
    None
}

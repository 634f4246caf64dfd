//! CSS

use crate::javascript::{DOUBLE_QUOTED, SINGLE_QUOTED};
use weblex_engine::lexical::{
    include, rule, words, LexerInfo, LexerOptions, RegexLexer, StateTable, TableError,
};
use weblex_engine::Category;

pub const INFO: LexerInfo = LexerInfo {
    name: "CSS",
    aliases: &["css"],
    filenames: &["*.css"],
    mimetypes: &["text/css"],
};

/// Property names and keyword values, shared with the Sass family
pub(crate) const PROPERTY_KEYWORDS: &[&str] = &[
    "azimuth", "background-attachment", "background-color", "background-image",
    "background-position", "background-repeat", "background", "border-bottom-color",
    "border-bottom-style", "border-bottom-width", "border-left-color", "border-left-style",
    "border-left-width", "border-right", "border-right-color", "border-right-style",
    "border-right-width", "border-top-color", "border-top-style", "border-top-width",
    "border-bottom", "border-collapse", "border-left", "border-width", "border-color",
    "border-spacing", "border-style", "border-top", "border", "caption-side", "clear", "clip",
    "color", "content", "counter-increment", "counter-reset", "cue-after", "cue-before", "cue",
    "cursor", "direction", "display", "elevation", "empty-cells", "float", "font-family",
    "font-size", "font-size-adjust", "font-stretch", "font-style", "font-variant",
    "font-weight", "font", "height", "letter-spacing", "line-height", "list-style-type",
    "list-style-image", "list-style-position", "list-style", "margin-bottom", "margin-left",
    "margin-right", "margin-top", "margin", "marker-offset", "marks", "max-height",
    "max-width", "min-height", "min-width", "opacity", "orphans", "outline", "outline-color",
    "outline-style", "outline-width", "overflow", "padding-bottom", "padding-left",
    "padding-right", "padding-top", "padding", "page", "page-break-after",
    "page-break-before", "page-break-inside", "pause-after", "pause-before", "pause", "pitch",
    "pitch-range", "play-during", "position", "quotes", "richness", "right", "size",
    "speak-header", "speak-numeral", "speak-punctuation", "speak", "speech-rate", "stress",
    "table-layout", "text-align", "text-decoration", "text-indent", "text-shadow",
    "text-transform", "top", "unicode-bidi", "vertical-align", "visibility", "voice-family",
    "volume", "white-space", "widows", "width", "word-spacing", "z-index", "bottom", "left",
    "above", "absolute", "always", "armenian", "aural", "auto", "avoid", "baseline", "behind",
    "below", "bidi-override", "blink", "block", "bold", "bolder", "both", "capitalize",
    "center-left", "center-right", "center", "circle", "cjk-ideographic", "close-quote",
    "collapse", "condensed", "continuous", "crop", "crosshair", "cross", "cursive", "dashed",
    "decimal-leading-zero", "decimal", "default", "digits", "disc", "dotted", "double",
    "e-resize", "embed", "extra-condensed", "extra-expanded", "expanded", "fantasy",
    "far-left", "far-right", "faster", "fast", "fixed", "georgian", "groove", "hebrew", "help",
    "hidden", "hide", "higher", "high", "hiragana-iroha", "hiragana", "icon", "inherit",
    "inline-table", "inline", "inset", "inside", "invert", "italic", "justify",
    "katakana-iroha", "katakana", "landscape", "larger", "large", "left-side", "leftwards",
    "level", "lighter", "line-through", "list-item", "loud", "lower-alpha", "lower-greek",
    "lower-roman", "lowercase", "ltr", "lower", "low", "medium", "message-box", "middle",
    "mix", "monospace", "n-resize", "narrower", "ne-resize", "no-close-quote",
    "no-open-quote", "no-repeat", "none", "normal", "nowrap", "nw-resize", "oblique", "once",
    "open-quote", "outset", "outside", "overline", "pointer", "portrait", "px", "relative",
    "repeat-x", "repeat-y", "repeat", "rgb", "ridge", "right-side", "rightwards", "s-resize",
    "sans-serif", "scroll", "se-resize", "semi-condensed", "semi-expanded", "separate",
    "serif", "show", "silent", "slow", "slower", "small-caps", "small-caption", "smaller",
    "soft", "solid", "spell-out", "square", "static", "status-bar", "super", "sw-resize",
    "table-caption", "table-cell", "table-column", "table-column-group",
    "table-footer-group", "table-header-group", "table-row", "table-row-group", "text",
    "text-bottom", "text-top", "thick", "thin", "transparent", "ultra-condensed",
    "ultra-expanded", "underline", "upper-alpha", "upper-latin", "upper-roman", "uppercase",
    "url", "visible", "w-resize", "wait", "wider", "x-fast", "x-high", "x-large", "x-loud",
    "x-low", "x-small", "x-soft", "xx-large", "xx-small", "yes",
];

/// The sixteen HTML 4 color keywords
pub(crate) const BASIC_COLORS: &[&str] = &[
    "black", "silver", "gray", "white", "maroon", "red", "purple", "fuchsia", "green", "lime",
    "olive", "yellow", "navy", "blue", "teal", "aqua",
];

/// The remaining X11 color names
pub(crate) const EXTENDED_COLORS: &[&str] = &[
    "indigo", "gold", "firebrick", "indianred", "darkolivegreen", "darkseagreen",
    "mediumvioletred", "mediumorchid", "chartreuse", "mediumslateblue", "springgreen",
    "crimson", "lightsalmon", "brown", "turquoise", "olivedrab", "cyan", "skyblue",
    "darkturquoise", "goldenrod", "darkgreen", "darkviolet", "darkgray", "lightpink",
    "darkmagenta", "lightgoldenrodyellow", "lavender", "yellowgreen", "thistle", "violet",
    "orchid", "ghostwhite", "honeydew", "cornflowerblue", "darkblue", "darkkhaki",
    "mediumpurple", "cornsilk", "bisque", "slategray", "darkcyan", "khaki", "wheat",
    "deepskyblue", "darkred", "steelblue", "aliceblue", "gainsboro", "mediumturquoise",
    "floralwhite", "coral", "lightgrey", "lightcyan", "darksalmon", "beige", "azure",
    "lightsteelblue", "oldlace", "greenyellow", "royalblue", "lightseagreen", "mistyrose",
    "sienna", "lightcoral", "orangered", "navajowhite", "palegreen", "burlywood", "seashell",
    "mediumspringgreen", "papayawhip", "blanchedalmond", "peru", "aquamarine",
    "darkslategray", "ivory", "dodgerblue", "lemonchiffon", "chocolate", "orange",
    "forestgreen", "slateblue", "mintcream", "antiquewhite", "darkorange", "cadetblue",
    "moccasin", "limegreen", "saddlebrown", "darkslateblue", "lightskyblue", "deeppink",
    "plum", "darkgoldenrod", "sandybrown", "magenta", "tan", "rosybrown", "pink", "lightblue",
    "palevioletred", "mediumseagreen", "dimgray", "powderblue", "seagreen", "snow",
    "mediumblue", "midnightblue", "paleturquoise", "palegoldenrod", "whitesmoke",
    "darkorchid", "salmon", "lightslategray", "lawngreen", "lightgreen", "tomato", "hotpink",
    "lightyellow", "lavenderblush", "linen", "mediumaquamarine", "blueviolet", "peachpuff",
];

fn property_keywords() -> String {
    let mut keywords = PROPERTY_KEYWORDS.to_vec();
    keywords.extend(["overflow-x", "overflow-y"]);
    words(&keywords, "", r"\b")
}

fn color_names() -> String {
    let colors: Vec<&str> = BASIC_COLORS.iter().chain(EXTENDED_COLORS).copied().collect();
    words(&colors, "", r"\b")
}

pub fn table() -> Result<StateTable, TableError> {
    StateTable::builder()
        .state("root", vec![include("basics")])
        .state(
            "basics",
            vec![
                rule(r"\s+", Category::Text),
                rule(r"/\*(?:.|\n)*?\*/", Category::Comment),
                rule(r"\{", Category::Punctuation).push("content"),
                rule(r":[a-zA-Z0-9_-]+", Category::NameDecorator),
                rule(r"\.[a-zA-Z0-9_-]+", Category::NameClass),
                rule(r"#[a-zA-Z0-9_-]+", Category::NameFunction),
                rule(r"@[a-zA-Z0-9_-]+", Category::Keyword).push("atrule"),
                rule(r"[a-zA-Z0-9_-]+", Category::NameTag),
                rule(r"[~\^\*!%&\[\]\(\)<>\|+=@:;,./?-]", Category::Operator),
                rule(DOUBLE_QUOTED, Category::StringDouble),
                rule(SINGLE_QUOTED, Category::StringSingle),
            ],
        )
        .state(
            "atrule",
            vec![
                rule(r"\{", Category::Punctuation).push("atcontent"),
                rule(";", Category::Punctuation).pop(1),
                include("basics"),
            ],
        )
        .state(
            "atcontent",
            vec![
                include("basics"),
                rule(r"\}", Category::Punctuation).pop(2),
            ],
        )
        .state(
            "content",
            vec![
                rule(r"\s+", Category::Text),
                rule(r"\}", Category::Punctuation).pop(1),
                rule(r"url\(.*?\)", Category::StringOther),
                rule("^@.*?$", Category::CommentPreproc),
                rule(property_keywords(), Category::Keyword),
                rule(color_names(), Category::NameBuiltin),
                rule("!important", Category::CommentPreproc),
                rule(r"/\*(?:.|\n)*?\*/", Category::Comment),
                rule("#[a-zA-Z0-9]{1,6}", Category::Number),
                rule(
                    r"[\.-]?[0-9]*[\.]?[0-9]+(em|px|%|pt|pc|in|mm|cm|ex)",
                    Category::Number,
                ),
                rule("-?[0-9]+", Category::Number),
                rule(r"[~\^\*!%&<>\|+=@:,./?-]+", Category::Operator),
                rule(r"[\[\]();]+", Category::Punctuation),
                rule(DOUBLE_QUOTED, Category::StringDouble),
                rule(SINGLE_QUOTED, Category::StringSingle),
                rule("[a-zA-Z][a-zA-Z0-9]+", Category::Name),
            ],
        )
        .build()
}

pub fn lexer(_options: &LexerOptions) -> Result<RegexLexer, TableError> {
    RegexLexer::builder(INFO, table()?).build()
}

pub fn analyse_text(_text: &str) -> f32 {
    0.0
}

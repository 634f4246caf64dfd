//! ActionScript and ActionScript 3

use crate::analysis::clamp_score;
use crate::javascript::{DOUBLE_QUOTED, SINGLE_QUOTED};
use regex::Regex;
use std::sync::OnceLock;
use weblex_engine::bygroups;
use weblex_engine::lexical::{
    rule, using_this, words, LexerInfo, LexerOptions, RegexFlags, RegexLexer, StateTable,
    TableError,
};
use weblex_engine::Category;

pub const INFO: LexerInfo = LexerInfo {
    name: "ActionScript",
    aliases: &["as", "actionscript"],
    filenames: &["*.as"],
    mimetypes: &[
        "application/x-actionscript",
        "text/x-actionscript",
        "text/actionscript",
    ],
};

pub const AS3_INFO: LexerInfo = LexerInfo {
    name: "ActionScript 3",
    aliases: &["as3", "actionscript3"],
    filenames: &["*.as"],
    mimetypes: &[
        "application/x-actionscript",
        "text/x-actionscript",
        "text/actionscript",
    ],
};

const IDENTIFIER: &str = "[$a-zA-Z_][a-zA-Z0-9_]*";

const DECLARATIONS: &[&str] = &[
    "class", "public", "final", "internal", "native", "override", "private", "protected",
    "static", "import", "extends", "implements", "interface", "intrinsic", "return", "super",
    "dynamic", "function", "const", "get", "namespace", "package", "set",
];

const GLOBAL_FUNCTIONS: &[&str] = &[
    "decodeURI",
    "decodeURIComponent",
    "encodeURI",
    "escape",
    "eval",
    "isFinite",
    "isNaN",
    "isXMLName",
    "clearInterval",
    "fscommand",
    "getTimer",
    "getURL",
    "getVersion",
    "parseFloat",
    "parseInt",
    "setInterval",
    "trace",
    "updateAfterEvent",
    "unescape",
];

const BUILTIN_CLASSES: &[&str] = &[
    "Accessibility", "AccessibilityProperties", "ActionScriptVersion", "ActivityEvent",
    "AntiAliasType", "ApplicationDomain", "AsBroadcaster", "Array", "AsyncErrorEvent",
    "AVM1Movie", "BevelFilter", "Bitmap", "BitmapData", "BitmapDataChannel", "BitmapFilter",
    "BitmapFilterQuality", "BitmapFilterType", "BlendMode", "BlurFilter", "Boolean",
    "ByteArray", "Camera", "Capabilities", "CapsStyle", "Class", "Color", "ColorMatrixFilter",
    "ColorTransform", "ContextMenu", "ContextMenuBuiltInItems", "ContextMenuEvent",
    "ContextMenuItem", "ConvultionFilter", "CSMSettings", "DataEvent", "Date",
    "DefinitionError", "DeleteObjectSample", "Dictionary", "DisplacmentMapFilter",
    "DisplayObject", "DisplacmentMapFilterMode", "DisplayObjectContainer", "DropShadowFilter",
    "Endian", "EOFError", "Error", "ErrorEvent", "EvalError", "Event", "EventDispatcher",
    "EventPhase", "ExternalInterface", "FileFilter", "FileReference", "FileReferenceList",
    "FocusDirection", "FocusEvent", "Font", "FontStyle", "FontType", "FrameLabel",
    "FullScreenEvent", "Function", "GlowFilter", "GradientBevelFilter", "GradientGlowFilter",
    "GradientType", "Graphics", "GridFitType", "HTTPStatusEvent", "IBitmapDrawable",
    "ID3Info", "IDataInput", "IDataOutput", "IDynamicPropertyOutput",
    "IDynamicPropertyWriter", "IEventDispatcher", "IExternalizable", "IllegalOperationError",
    "IME", "IMEConversionMode", "IMEEvent", "int", "InteractiveObject",
    "InterpolationMethod", "InvalidSWFError", "InvokeEvent", "IOError", "IOErrorEvent",
    "JointStyle", "Key", "Keyboard", "KeyboardEvent", "KeyLocation", "LineScaleMode",
    "Loader", "LoaderContext", "LoaderInfo", "LoadVars", "LocalConnection", "Locale", "Math",
    "Matrix", "MemoryError", "Microphone", "MorphShape", "Mouse", "MouseEvent", "MovieClip",
    "MovieClipLoader", "Namespace", "NetConnection", "NetStatusEvent", "NetStream",
    "NewObjectSample", "Number", "Object", "ObjectEncoding", "PixelSnapping", "Point",
    "PrintJob", "PrintJobOptions", "PrintJobOrientation", "ProgressEvent", "Proxy", "QName",
    "RangeError", "Rectangle", "ReferenceError", "RegExp", "Responder", "Sample", "Scene",
    "ScriptTimeoutError", "Security", "SecurityDomain", "SecurityError",
    "SecurityErrorEvent", "SecurityPanel", "Selection", "Shape", "SharedObject",
    "SharedObjectFlushStatus", "SimpleButton", "Socket", "Sound", "SoundChannel",
    "SoundLoaderContext", "SoundMixer", "SoundTransform", "SpreadMethod", "Sprite",
    "StackFrame", "StackOverflowError", "Stage", "StageAlign", "StageDisplayState",
    "StageQuality", "StageScaleMode", "StaticText", "StatusEvent", "String", "StyleSheet",
    "SWFVersion", "SyncEvent", "SyntaxError", "System", "TextColorType", "TextField",
    "TextFieldAutoSize", "TextFieldType", "TextFormat", "TextFormatAlign", "TextLineMetrics",
    "TextRenderer", "TextSnapshot", "Timer", "TimerEvent", "Transform", "TypeError", "uint",
    "URIError", "URLLoader", "URLLoaderDataFormat", "URLRequest", "URLRequestHeader",
    "URLRequestMethod", "URLStream", "URLVariabeles", "VerifyError", "Video", "XML",
    "XMLDocument", "XMLList", "XMLNode", "XMLNodeType", "XMLSocket", "XMLUI",
];

pub fn table() -> Result<StateTable, TableError> {
    StateTable::builder()
        .flags(RegexFlags::none().dot_all())
        .state(
            "root",
            vec![
                rule(r"\s+", Category::Text),
                rule(r"//.*?\n", Category::CommentSingle),
                rule(r"/\*.*?\*/", Category::CommentMultiline),
                rule(r"/(\\\\|\\/|[^/\n])*/[gim]*", Category::StringRegex),
                rule(r"[~\^\*!%&<>\|+=:;,/?\\-]+", Category::Operator),
                rule(r"[\{\}\[\]();.]+", Category::Punctuation),
                rule(
                    words(
                        &[
                            "case", "default", "for", "each", "in", "while", "do", "break",
                            "return", "continue", "if", "else", "throw", "try", "catch", "var",
                            "with", "new", "typeof", "arguments", "instanceof", "this",
                            "switch",
                        ],
                        "",
                        r"\b",
                    ),
                    Category::Keyword,
                ),
                rule(words(DECLARATIONS, "", r"\b"), Category::KeywordDeclaration),
                rule(
                    words(
                        &[
                            "true", "false", "null", "NaN", "Infinity", "-Infinity", "undefined",
                            "Void",
                        ],
                        "",
                        r"\b",
                    ),
                    Category::KeywordConstant,
                ),
                rule(words(BUILTIN_CLASSES, "", r"\b"), Category::NameBuiltin),
                rule(words(GLOBAL_FUNCTIONS, "", r"\b"), Category::NameFunction),
                rule(IDENTIFIER, Category::NameOther),
                rule(r"[0-9][0-9]*\.[0-9]+([eE][0-9]+)?[fd]?", Category::NumberFloat),
                rule("0x[0-9a-f]+", Category::NumberHex),
                rule("[0-9]+", Category::NumberInteger),
                rule(DOUBLE_QUOTED, Category::StringDouble),
                rule(SINGLE_QUOTED, Category::StringSingle),
            ],
        )
        .build()
}

pub fn lexer(_options: &LexerOptions) -> Result<RegexLexer, TableError> {
    RegexLexer::builder(INFO, table()?).build()
}

pub fn analyse_text(_text: &str) -> f32 {
    0.05
}

// ============================================================================
// ACTIONSCRIPT 3
// ============================================================================

/// Typed declarations open `funcparams`; each parameter may carry a default value
/// that is lexed as ActionScript 3 itself.
pub fn as3_table() -> Result<StateTable, TableError> {
    let id = IDENTIFIER;

    StateTable::builder()
        .flags(RegexFlags::none().dot_all().multi_line())
        .state(
            "root",
            vec![
                rule(r"\s+", Category::Text),
                rule(
                    format!(r"(function\s+)({})(\s*)(\()", id),
                    bygroups![
                        Category::KeywordDeclaration,
                        Category::NameFunction,
                        Category::Text,
                        Category::Operator
                    ],
                )
                .push("funcparams"),
                rule(
                    format!(r"(var|const)(\s+)({})(\s*)(:)(\s*)({})", id, id),
                    bygroups![
                        Category::KeywordDeclaration,
                        Category::Text,
                        Category::Name,
                        Category::Text,
                        Category::Punctuation,
                        Category::Text,
                        Category::KeywordType
                    ],
                ),
                rule(
                    format!(r"(import|package)(\s+)((?:{}|\.)+)(\s*)", id),
                    bygroups![
                        Category::Keyword,
                        Category::Text,
                        Category::NameNamespace,
                        Category::Text
                    ],
                ),
                rule(
                    format!(r"(new)(\s+)({})(\s*)(\()", id),
                    bygroups![
                        Category::Keyword,
                        Category::Text,
                        Category::KeywordType,
                        Category::Text,
                        Category::Operator
                    ],
                ),
                rule(r"//.*?\n", Category::CommentSingle),
                rule(r"/\*.*?\*/", Category::CommentMultiline),
                rule(r"/(\\\\|\\/|[^\n])*/[gisx]*", Category::StringRegex),
                rule(
                    format!(r"(\.)({})", id),
                    bygroups![Category::Operator, Category::NameAttribute],
                ),
                rule(
                    words(
                        &[
                            "case", "default", "for", "each", "in", "while", "do", "break",
                            "return", "continue", "if", "else", "throw", "try", "catch", "with",
                            "new", "typeof", "arguments", "instanceof", "this", "switch",
                            "import", "include", "as", "is",
                        ],
                        "",
                        r"\b",
                    ),
                    Category::Keyword,
                ),
                rule(words(DECLARATIONS, "", r"\b"), Category::KeywordDeclaration),
                rule(
                    words(
                        &[
                            "true", "false", "null", "NaN", "Infinity", "-Infinity", "undefined",
                            "void",
                        ],
                        "",
                        r"\b",
                    ),
                    Category::KeywordConstant,
                ),
                rule(words(GLOBAL_FUNCTIONS, "", r"\b"), Category::NameFunction),
                rule(id, Category::Name),
                rule(r"[0-9][0-9]*\.[0-9]+([eE][0-9]+)?[fd]?", Category::NumberFloat),
                rule("0x[0-9a-f]+", Category::NumberHex),
                rule("[0-9]+", Category::NumberInteger),
                rule(DOUBLE_QUOTED, Category::StringDouble),
                rule(SINGLE_QUOTED, Category::StringSingle),
                rule(r"[~\^\*!%&<>\|+=:;,/?\\\{\}\[\]();.-]+", Category::Operator),
            ],
        )
        .state(
            "funcparams",
            vec![
                rule(r"\s+", Category::Text),
                rule(
                    format!(r"(\s*)(\.\.\.)?({})(\s*)(:)(\s*)({}|\*)(\s*)", id, id),
                    bygroups![
                        Category::Text,
                        Category::Punctuation,
                        Category::Name,
                        Category::Text,
                        Category::Operator,
                        Category::Text,
                        Category::KeywordType,
                        Category::Text
                    ],
                )
                .push("defval"),
                rule(r"\)", Category::Operator).push("type"),
            ],
        )
        .state(
            "type",
            vec![
                rule(
                    format!(r"(\s*)(:)(\s*)({}|\*)", id),
                    bygroups![
                        Category::Text,
                        Category::Operator,
                        Category::Text,
                        Category::KeywordType
                    ],
                )
                .pop(2),
                rule(r"\s*", Category::Text).pop(2),
            ],
        )
        .state(
            "defval",
            vec![
                rule(
                    r"(=)(\s*)([^(),]+)(\s*)(,?)",
                    bygroups![
                        Category::Operator,
                        Category::Text,
                        using_this(),
                        Category::Text,
                        Category::Operator
                    ],
                )
                .pop(1),
                rule(",?", Category::Operator).pop(1),
            ],
        )
        .build()
}

pub fn as3_lexer(_options: &LexerOptions) -> Result<RegexLexer, TableError> {
    RegexLexer::builder(AS3_INFO, as3_table()?).build()
}

static LABELLED_START: OnceLock<Option<Regex>> = OnceLock::new();

/// `name : type` right at the start reads like an AS3 declaration
pub(crate) fn starts_with_type_annotation(text: &str) -> bool {
    LABELLED_START
        .get_or_init(|| Regex::new(r"^\w+\s*:\s*\w").ok())
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(text))
}

pub fn as3_analyse_text(text: &str) -> f32 {
    clamp_score(if starts_with_type_annotation(text) {
        0.3
    } else {
        0.1
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use weblex_engine::{validate_tokenization, Token};

    fn lex_as3(text: &str) -> Vec<Token<'_>> {
        let tokens: Vec<_> = as3_lexer(&LexerOptions::new())
            .unwrap()
            .tokenize(text)
            .collect();
        assert_eq!(validate_tokenization(text, &tokens), Ok(()));
        tokens
    }

    fn significant<'t>(tokens: &[Token<'t>]) -> Vec<(Category, &'t str)> {
        tokens
            .iter()
            .filter(|t| !t.text.trim().is_empty())
            .map(|t| (t.category, t.text))
            .collect()
    }

    #[test]
    fn test_actionscript_builtins() {
        let text = "var clip:MovieClip = new MovieClip();\ntrace(clip);\n";
        let tokens: Vec<_> = lexer(&LexerOptions::new()).unwrap().tokenize(text).collect();
        assert_eq!(validate_tokenization(text, &tokens), Ok(()));

        let categorized = significant(&tokens);
        assert!(categorized.contains(&(Category::Keyword, "var")));
        assert!(categorized.contains(&(Category::NameBuiltin, "MovieClip")));
        assert!(categorized.contains(&(Category::NameFunction, "trace")));
        assert!(categorized.contains(&(Category::NameOther, "clip")));
    }

    #[test]
    fn test_as3_function_signature_with_default() {
        let text = "function add(a:int, b:int = 2):int { return a + b; }";
        let tokens = lex_as3(text);
        let categorized = significant(&tokens);

        assert_eq!(categorized[0], (Category::KeywordDeclaration, "function "));
        assert_eq!(categorized[1], (Category::NameFunction, "add"));
        assert_eq!(categorized[2], (Category::Operator, "("));
        assert!(categorized.contains(&(Category::KeywordType, "int")));
        assert!(categorized.contains(&(Category::NumberInteger, "2")));
        assert!(categorized.contains(&(Category::Keyword, "return")));
    }

    #[test]
    fn test_as3_default_value_is_delegated_with_offsets() {
        let text = "function f(s:String = 'x'):void {}";
        let tokens = lex_as3(text);
        let quoted = tokens.iter().find(|t| t.text == "'x'").unwrap();
        assert_eq!(quoted.category, Category::StringSingle);
        assert_eq!(quoted.offset, text.find("'x'").unwrap());
    }

    #[test]
    fn test_as3_typed_variable() {
        let tokens = lex_as3("var count:uint");
        assert_eq!(
            significant(&tokens),
            vec![
                (Category::KeywordDeclaration, "var"),
                (Category::Name, "count"),
                (Category::Punctuation, ":"),
                (Category::KeywordType, "uint"),
            ]
        );
    }

    #[test]
    fn test_scores() {
        assert_eq!(analyse_text("anything"), 0.05);
        assert_eq!(as3_analyse_text("count : int = 3"), 0.3);
        assert_eq!(as3_analyse_text("package foo {}"), 0.1);
    }
}

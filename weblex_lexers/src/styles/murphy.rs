//! Murphy's style, after the CodeRay theme of the same name

use super::{StyleError, StyleSheet};
use weblex_engine::Category;

const DEFINITIONS: &[(Category, &str)] = &[
    (Category::Comment, "#666 italic"),
    (Category::CommentPreproc, "#579 noitalic"),
    (Category::Keyword, "bold #289"),
    (Category::KeywordPseudo, "#08f"),
    (Category::KeywordType, "#66f"),
    (Category::Operator, "#333"),
    (Category::OperatorWord, "bold #000"),
    (Category::NameBuiltin, "#072"),
    (Category::NameFunction, "bold #5ed"),
    (Category::NameClass, "bold #e9e"),
    (Category::NameNamespace, "bold #0e84b5"),
    (Category::NameException, "bold #F00"),
    (Category::NameVariable, "#036"),
    (Category::NameVariableInstance, "#aaf"),
    (Category::NameVariableClass, "#ccf"),
    (Category::NameVariableGlobal, "#f84"),
    (Category::NameConstant, "bold #5ed"),
    (Category::NameLabel, "bold #970"),
    (Category::NameEntity, "#800"),
    (Category::NameAttribute, "#007"),
    (Category::NameTag, "#070"),
    (Category::NameDecorator, "bold #555"),
    (Category::String, "bg:#e0e0ff"),
    (Category::StringChar, "#88F bg:"),
    (Category::StringDoc, "#D42 bg:"),
    (Category::StringInterpol, "bg:#eee"),
    (Category::StringEscape, "bold #666"),
    (Category::StringRegex, "bg:#e0e0ff #000"),
    (Category::StringSymbol, "#fc8 bg:"),
    (Category::StringOther, "#f88"),
    (Category::Number, "bold #60E"),
    (Category::NumberInteger, "bold #66f"),
    (Category::NumberFloat, "bold #60E"),
    (Category::NumberHex, "bold #058"),
    (Category::NumberOct, "bold #40E"),
    (Category::GenericHeading, "bold #000080"),
    (Category::GenericSubheading, "bold #800080"),
    (Category::GenericDeleted, "#A00000"),
    (Category::GenericInserted, "#00A000"),
    (Category::GenericError, "#FF0000"),
    (Category::GenericEmph, "italic"),
    (Category::GenericStrong, "bold"),
    (Category::GenericPrompt, "bold #c65d09"),
    (Category::GenericOutput, "#888"),
    (Category::GenericTraceback, "#04D"),
    (Category::Error, "#F00 bg:#FAA"),
];

pub fn murphy() -> Result<StyleSheet, StyleError> {
    StyleSheet::new("murphy", "", DEFINITIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_murphy_resolves() {
        let sheet = murphy().unwrap();
        assert_eq!(sheet.name(), "murphy");

        let preproc = sheet.resolve(Category::CommentPreproc);
        assert_eq!(preproc.color.as_deref(), Some("557799"));
        assert!(!preproc.italic);
        assert!(sheet.resolve(Category::CommentSingle).italic);

        let char_style = sheet.resolve(Category::StringChar);
        assert_eq!(char_style.color.as_deref(), Some("8888FF"));
        assert_eq!(char_style.bgcolor, None);

        let double = sheet.resolve(Category::StringDouble);
        assert_eq!(double.bgcolor.as_deref(), Some("e0e0ff"));

        let long = sheet.resolve(Category::NumberIntegerLong);
        assert_eq!(long.color.as_deref(), Some("6666ff"));
        assert!(long.bold);

        assert_eq!(sheet.resolve(Category::Text), Default::default());
    }
}

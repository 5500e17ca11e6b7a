//! `Ast` <-> `string<application/x-path-expression>`

use crate::converter::StringFormat;
use crate::error::Result;
use crate::formats;
use crate::tag::{kinds, TypeTag};
use crate::value::{Ast, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct PathExpressionFormat;

impl StringFormat for PathExpressionFormat {
    fn name(&self) -> &str {
        "path-expression"
    }

    fn target(&self) -> TypeTag {
        TypeTag::new(kinds::AST)
    }

    fn string_format(&self) -> Option<&str> {
        Some(formats::PATH_EXPRESSION)
    }

    fn stringify(&self, input: &Value) -> Result<String> {
        Ok(input.as_ast()?.to_text())
    }

    fn parse(&self, text: &str) -> Result<Value> {
        Ok(Value::Ast(Ast::parse(text.trim())?))
    }
}

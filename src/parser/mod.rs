mod cursor;
mod frame;
mod parse_error;


use crate::ast::*;
use crate::lexer::{Token, TokenKind};
use cursor::Cursor;
pub use frame::{FrameAllocator, FrameEntry, SLOT_SIZE};
pub use parse_error::{InnerParseError, ParseError, Result};

fn parse_block(cursor: &mut Cursor, frames: &mut FrameAllocator) -> Result<AstStatement> {
    if cursor.bump_if(TokenKind::OpenCurly) {
        let mut items = AstBlockItems::new();
        while !cursor.bump_if(TokenKind::CloseCurly) {
            items.push(parse_statement(cursor, frames)?);
        }
        return Ok(AstStatement::Compound(AstBlock { items }));
    }

    parse_statement(cursor, frames)
}

fn parse_statement(cursor: &mut Cursor, frames: &mut FrameAllocator) -> Result<AstStatement> {
    match cursor.peek_kind() {
        TokenKind::If => parse_if(cursor, frames),
        TokenKind::While => parse_while(cursor, frames),
        TokenKind::For => parse_for(cursor, frames),
        TokenKind::Return => parse_return(cursor, frames),
        _ => {
            let exp = parse_exp(cursor, frames)?;
            cursor.expect(TokenKind::Semicolon)?;
            Ok(AstStatement::Exp(exp))
        }
    }
}

fn parse_if(cursor: &mut Cursor, frames: &mut FrameAllocator) -> Result<AstStatement> {
    cursor.expect(TokenKind::If)?;
    cursor.expect(TokenKind::OpenParanth)?;
    let condition = parse_exp(cursor, frames)?;
    cursor.expect(TokenKind::CloseParanth)?;
    let then = parse_block(cursor, frames).map(Box::new)?;
    let else_present = cursor.bump_if(TokenKind::Else);
    let els = else_present
        .then(|| parse_block(cursor, frames))
        .transpose()?
        .map(Box::new);

    Ok(AstStatement::If {
        condition,
        then,
        els,
    })
}

fn parse_while(cursor: &mut Cursor, frames: &mut FrameAllocator) -> Result<AstStatement> {
    cursor.expect(TokenKind::While)?;
    cursor.expect(TokenKind::OpenParanth)?;
    let condition = parse_exp(cursor, frames)?;
    cursor.expect(TokenKind::CloseParanth)?;
    let body = parse_block(cursor, frames).map(Box::new)?;

    Ok(AstStatement::While { condition, body })
}

fn parse_optional_clause(
    cursor: &mut Cursor,
    frames: &mut FrameAllocator,
    delim: TokenKind,
) -> Result<Option<AstExp>> {
    let not_met_delim = !cursor.bump_if(delim);
    let exp = not_met_delim
        .then(|| parse_exp(cursor, frames))
        .transpose()?;

    if not_met_delim {
        cursor.expect(delim)?;
    }

    Ok(exp)
}

fn parse_for(cursor: &mut Cursor, frames: &mut FrameAllocator) -> Result<AstStatement> {
    cursor.expect(TokenKind::For)?;
    cursor.expect(TokenKind::OpenParanth)?;
    let init = parse_optional_clause(cursor, frames, TokenKind::Semicolon)?;
    let condition = parse_optional_clause(cursor, frames, TokenKind::Semicolon)?;
    let post = parse_optional_clause(cursor, frames, TokenKind::CloseParanth)?;
    let body = parse_block(cursor, frames).map(Box::new)?;

    Ok(AstStatement::For {
        init,
        condition,
        post,
        body,
    })
}

fn parse_return(cursor: &mut Cursor, frames: &mut FrameAllocator) -> Result<AstStatement> {
    cursor.expect(TokenKind::Return)?;
    let exp = parse_exp(cursor, frames)?;
    cursor.expect(TokenKind::Semicolon)?;
    Ok(AstStatement::Return(exp))
}

fn parse_exp(cursor: &mut Cursor, frames: &mut FrameAllocator) -> Result<AstExp> {
    parse_assign(cursor, frames)
}

// right-associative: a = b = 1 assigns b first
fn parse_assign(cursor: &mut Cursor, frames: &mut FrameAllocator) -> Result<AstExp> {
    let left = parse_equality(cursor, frames)?;
    if cursor.bump_if(TokenKind::Assign) {
        let right = parse_assign(cursor, frames).map(Box::new)?;
        return Ok(AstExp::assignment(Box::new(left), right));
    }
    Ok(left)
}

fn parse_equality(cursor: &mut Cursor, frames: &mut FrameAllocator) -> Result<AstExp> {
    let mut left = parse_relational(cursor, frames)?;

    loop {
        if cursor.bump_if(TokenKind::IsEqual) {
            let right = parse_relational(cursor, frames).map(Box::new)?;
            left = AstExp::binary(AstBinaryOp::IsEqual, Box::new(left), right);
        } else if cursor.bump_if(TokenKind::IsNotEqual) {
            let right = parse_relational(cursor, frames).map(Box::new)?;
            left = AstExp::binary(AstBinaryOp::IsNotEqual, Box::new(left), right);
        } else {
            return Ok(left);
        }
    }
}

// `>` and `>=` are rewritten as `<` and `<=` with the operands swapped, so
// the code generator only ever sees the two less-than forms.
fn parse_relational(cursor: &mut Cursor, frames: &mut FrameAllocator) -> Result<AstExp> {
    let mut left = parse_add(cursor, frames)?;

    loop {
        if cursor.bump_if(TokenKind::IsLessThan) {
            let right = parse_add(cursor, frames).map(Box::new)?;
            left = AstExp::binary(AstBinaryOp::LessThan, Box::new(left), right);
        } else if cursor.bump_if(TokenKind::IsLessThanOrEqual) {
            let right = parse_add(cursor, frames).map(Box::new)?;
            left = AstExp::binary(AstBinaryOp::LessOrEqual, Box::new(left), right);
        } else if cursor.bump_if(TokenKind::IsGreaterThan) {
            let right = parse_add(cursor, frames).map(Box::new)?;
            left = AstExp::binary(AstBinaryOp::LessThan, right, Box::new(left));
        } else if cursor.bump_if(TokenKind::IsGreaterThanOrEqual) {
            let right = parse_add(cursor, frames).map(Box::new)?;
            left = AstExp::binary(AstBinaryOp::LessOrEqual, right, Box::new(left));
        } else {
            return Ok(left);
        }
    }
}

fn parse_add(cursor: &mut Cursor, frames: &mut FrameAllocator) -> Result<AstExp> {
    let mut left = parse_mul(cursor, frames)?;

    loop {
        if cursor.bump_if(TokenKind::Plus) {
            let right = parse_mul(cursor, frames).map(Box::new)?;
            left = AstExp::binary(AstBinaryOp::Add, Box::new(left), right);
        } else if cursor.bump_if(TokenKind::Hyphen) {
            let right = parse_mul(cursor, frames).map(Box::new)?;
            left = AstExp::binary(AstBinaryOp::Substract, Box::new(left), right);
        } else {
            return Ok(left);
        }
    }
}

fn parse_mul(cursor: &mut Cursor, frames: &mut FrameAllocator) -> Result<AstExp> {
    let mut left = parse_unary(cursor, frames)?;

    loop {
        if cursor.bump_if(TokenKind::Asterisk) {
            let right = parse_unary(cursor, frames).map(Box::new)?;
            left = AstExp::binary(AstBinaryOp::Multiply, Box::new(left), right);
        } else if cursor.bump_if(TokenKind::FSlash) {
            let right = parse_unary(cursor, frames).map(Box::new)?;
            left = AstExp::binary(AstBinaryOp::Div, Box::new(left), right);
        } else {
            return Ok(left);
        }
    }
}

fn parse_unary(cursor: &mut Cursor, frames: &mut FrameAllocator) -> Result<AstExp> {
    if cursor.bump_if(TokenKind::Plus) {
        return parse_unary(cursor, frames);
    }
    if cursor.bump_if(TokenKind::Hyphen) {
        // -x lowers to 0 - x
        let inner = parse_unary(cursor, frames).map(Box::new)?;
        return Ok(AstExp::binary(
            AstBinaryOp::Substract,
            Box::new(AstExp::constant(0)),
            inner,
        ));
    }
    parse_primary(cursor, frames)
}

fn parse_arguments(cursor: &mut Cursor, frames: &mut FrameAllocator) -> Result<Vec<AstExp>> {
    let mut args = Vec::new();

    if cursor.peek_kind() == TokenKind::CloseParanth {
        return Ok(args);
    }

    loop {
        args.push(parse_exp(cursor, frames)?);
        if !cursor.bump_if(TokenKind::Comma) {
            return Ok(args);
        }
    }
}

fn parse_primary(cursor: &mut Cursor, frames: &mut FrameAllocator) -> Result<AstExp> {
    if cursor.bump_if(TokenKind::OpenParanth) {
        let exp = parse_exp(cursor, frames)?;
        cursor.expect(TokenKind::CloseParanth)?;
        return Ok(exp);
    }

    let line = cursor.get_line();
    match cursor.peek_kind() {
        TokenKind::Num(value) => {
            cursor.bump();
            Ok(AstExp::constant(value))
        }
        TokenKind::Ident => {
            let name = cursor.peek_text().to_owned();
            cursor.bump();
            if cursor.bump_if(TokenKind::OpenParanth) {
                let args = parse_arguments(cursor, frames)?;
                cursor.expect(TokenKind::CloseParanth)?;
                return Ok(AstExp::call(name, args));
            }
            let offset = frames.resolve(&name);
            Ok(AstExp::var(name, offset))
        }
        kind => Err(InnerParseError::BadPrimary(kind).set_line(line)),
    }
}

pub fn parse(tokens: &[Token]) -> Result<Ast> {
    let mut cursor = Cursor::new(tokens);
    let mut frames = FrameAllocator::new();
    let mut items = AstBlockItems::new();

    while !cursor.at_eof() {
        items.push(parse_block(&mut cursor, &mut frames)?);
    }

    Ok(Ast {
        items,
        frame_size: frames.frame_size(),
    })
}

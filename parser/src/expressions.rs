use model::{BinaryOp, Expr, ParseError, SignOp, StepOp, Token};
use crate::parser::Parser;

/// Expression parsing functionality using precedence climbing
pub(crate) trait ExpressionParser {
    fn parse_expr(&mut self) -> Result<Expr, ParseError>;
}

impl<'a> ExpressionParser for Parser<'a> {
    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(0)
    }
}

fn binary_op(token: &Token) -> Option<BinaryOp> {
    let op = match token {
        Token::Equal => BinaryOp::Assign,
        Token::PlusEqual => BinaryOp::AddAssign,
        Token::MinusEqual => BinaryOp::SubAssign,
        Token::StarEqual => BinaryOp::MulAssign,
        Token::SlashEqual => BinaryOp::DivAssign,
        Token::EqualEqual => BinaryOp::Equal,
        Token::BangEqual => BinaryOp::NotEqual,
        Token::Less => BinaryOp::Less,
        Token::Greater => BinaryOp::Greater,
        Token::LessEqual => BinaryOp::LessEqual,
        Token::GreaterEqual => BinaryOp::GreaterEqual,
        Token::Plus => BinaryOp::Add,
        Token::Minus => BinaryOp::Sub,
        Token::Star => BinaryOp::Mul,
        Token::Slash => BinaryOp::Div,
        Token::Caret => BinaryOp::Pow,
        _ => return None,
    };
    Some(op)
}

fn step_op(token: &Token) -> Option<StepOp> {
    match token {
        Token::PlusPlus => Some(StepOp::Increment),
        Token::MinusMinus => Some(StepOp::Decrement),
        _ => None,
    }
}

impl<'a> Parser<'a> {
    /// Precedence climbing. The right operand is parsed at the operator's own
    /// level, so chains of equal precedence group to the right.
    pub(crate) fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let mut left = self.parse_base()?;

        while let Some(op) = binary_op(self.peek()) {
            if op.precedence() < min_prec {
                break;
            }
            self.advance();
            let right = self.parse_binary(op.precedence())?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_base(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek();
        match token {
            Token::IntLiteral { value } => {
                self.advance();
                value
                    .parse::<i32>()
                    .map(Expr::IntLiteral)
                    .map_err(|_| ParseError::InvalidLiteral(value.clone()))
            }
            Token::DoubleLiteral { value } => {
                self.advance();
                value
                    .parse::<f64>()
                    .map(Expr::DoubleLiteral)
                    .map_err(|_| ParseError::InvalidLiteral(value.clone()))
            }
            Token::CharLiteral { value } => {
                self.advance();
                Ok(Expr::CharLiteral(*value))
            }
            Token::BoolLiteral { value } => {
                self.advance();
                Ok(Expr::BoolLiteral(*value))
            }
            Token::Identifier { value } => {
                self.advance();
                self.parse_identifier_suffix(value.clone())
            }
            Token::Plus | Token::Minus => {
                self.advance();
                if matches!(token, Token::Minus) {
                    if let Some(value) = self.negated_int_literal() {
                        self.advance();
                        return Ok(Expr::IntLiteral(value));
                    }
                }
                let op = if matches!(token, Token::Plus) { SignOp::Plus } else { SignOp::Minus };
                let operand = self.parse_base()?;
                Ok(Expr::Unary {
                    op,
                    operand: Box::new(operand),
                })
            }
            Token::PlusPlus | Token::MinusMinus => {
                self.advance();
                let op = if matches!(token, Token::PlusPlus) { StepOp::Increment } else { StepOp::Decrement };
                let name = self.expect_identifier()?;
                Ok(Expr::Prefix {
                    op,
                    operand: Box::new(Expr::Identifier(name)),
                })
            }
            Token::OpenParenthesis => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(|t| matches!(t, Token::CloseParenthesis), "')'")?;
                Ok(Expr::Paren(Box::new(inner)))
            }
            other => {
                tracing::debug!(pos = self.pos, token = %other, "no expression starts here");
                Err(ParseError::UnexpectedToken(other.clone()))
            }
        }
    }

    /// An identifier becomes a call when followed by `(`, or a postfix step
    /// when followed by `++`/`--`.
    fn parse_identifier_suffix(&mut self, name: String) -> Result<Expr, ParseError> {
        if self.match_token(|t| matches!(t, Token::OpenParenthesis)) {
            let args = self.parse_call_args()?;
            return Ok(Expr::Call { name, args });
        }

        if let Some(op) = step_op(self.peek()) {
            self.advance();
            return Ok(Expr::Postfix {
                op,
                operand: Box::new(Expr::Identifier(name)),
            });
        }

        Ok(Expr::Identifier(name))
    }

    /// `-2147483648` only fits in an `int` once the sign is folded in.
    fn negated_int_literal(&self) -> Option<i32> {
        let Token::IntLiteral { value } = self.peek() else {
            return None;
        };
        if value.parse::<i32>().is_ok() {
            return None;
        }
        let magnitude = value.parse::<i64>().ok()?;
        i32::try_from(-magnitude).ok()
    }

    fn parse_call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if self.match_token(|t| matches!(t, Token::CloseParenthesis)) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expr()?);
            if !self.match_token(|t| matches!(t, Token::Comma)) {
                break;
            }
        }

        self.expect(|t| matches!(t, Token::CloseParenthesis), "')'")?;
        Ok(args)
    }
}

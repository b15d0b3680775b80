// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Abstract Syntax Tree (AST) definitions for JavaScript modules.
//!
//! These structures follow ESTree naming where possible. Nodes own their
//! children, so a rewriting pass consumes a tree and returns a new one
//! (see [`crate::visit::Fold`]).

/// A complete JavaScript module.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// The top-level statements, including import and export declarations
    pub body: Vec<Statement>,
}

/// An identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// The name of the identifier
    pub name: String,
}

impl Identifier {
    /// Creates an identifier with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A JavaScript statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Variable declaration (var, let, const)
    VariableDeclaration(VariableDeclaration),
    /// Function declaration; `id` is always present
    FunctionDeclaration(Function),
    /// Class declaration; `id` is always present
    ClassDeclaration(Class),
    /// Expression statement
    Expression(ExpressionStatement),
    /// Block statement { ... }
    Block(BlockStatement),
    /// If statement
    If(IfStatement),
    /// Switch statement
    Switch(SwitchStatement),
    /// While statement
    While(WhileStatement),
    /// Do-while statement
    DoWhile(DoWhileStatement),
    /// For statement
    For(ForStatement),
    /// For-in statement
    ForIn(ForInStatement),
    /// For-of statement
    ForOf(ForOfStatement),
    /// Return statement
    Return(ReturnStatement),
    /// Break statement
    Break,
    /// Break with label
    BreakLabel(String),
    /// Continue statement
    Continue,
    /// Continue with label
    ContinueLabel(String),
    /// Throw statement
    Throw(ThrowStatement),
    /// Try statement
    Try(TryStatement),
    /// Labeled statement
    Labeled(LabeledStatement),
    /// Debugger statement
    Debugger,
    /// Empty statement (;)
    Empty,
    /// `import ... from "source"` or `import "source"`
    Import(ImportDeclaration),
    /// `export <declaration>`, `export { ... }` or `export { ... } from "source"`
    ExportNamed(ExportNamedDeclaration),
    /// `export default ...`
    ExportDefault(ExportDefaultDeclaration),
    /// `export * from "source"` or `export * as name from "source"`
    ExportAll(ExportAllDeclaration),
}

/// Variable declaration kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// var declaration
    Var,
    /// let declaration
    Let,
    /// const declaration
    Const,
}

impl VariableKind {
    /// The keyword that introduces this declaration.
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

/// A variable declaration statement.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// The kind of declaration
    pub kind: VariableKind,
    /// The declarators
    pub declarations: Vec<VariableDeclarator>,
}

/// A single variable declarator.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    /// The binding pattern being declared
    pub id: Pattern,
    /// Optional initializer expression
    pub init: Option<Expression>,
}

/// A function, shared by declarations, expressions, methods and accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// The function name
    pub id: Option<Identifier>,
    /// The parameters
    pub params: Vec<Pattern>,
    /// The function body
    pub body: Vec<Statement>,
    /// Whether this is an async function
    pub is_async: bool,
    /// Whether this is a generator function
    pub is_generator: bool,
}

/// A class, shared by declarations and expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    /// The class name
    pub id: Option<Identifier>,
    /// The `extends` clause
    pub super_class: Option<Box<Expression>>,
    /// The class body
    pub body: Vec<ClassMember>,
}

/// A member of a class body.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    /// Method, accessor or constructor
    Method(ClassMethod),
    /// Field declaration
    Property(ClassProperty),
    /// `static { ... }`
    StaticBlock(Vec<Statement>),
}

/// The role of a class method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// `constructor(...)`
    Constructor,
    /// Ordinary method
    Method,
    /// `get name()`
    Get,
    /// `set name(v)`
    Set,
}

/// A class method.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMethod {
    /// The method name
    pub key: PropertyKey,
    /// The role of the method
    pub kind: MethodKind,
    /// Whether the method is static
    pub is_static: bool,
    /// The method function (without an id)
    pub value: Function,
}

/// A class field.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassProperty {
    /// The field name
    pub key: PropertyKey,
    /// The initializer
    pub value: Option<Expression>,
    /// Whether the field is static
    pub is_static: bool,
}

/// An expression statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    /// The expression
    pub expression: Expression,
}

/// A block statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStatement {
    /// The statements in the block
    pub body: Vec<Statement>,
}

/// An if statement.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    /// The condition
    pub test: Expression,
    /// The then branch
    pub consequent: Box<Statement>,
    /// The optional else branch
    pub alternate: Option<Box<Statement>>,
}

/// A switch statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    /// The discriminant expression
    pub discriminant: Expression,
    /// The case clauses
    pub cases: Vec<SwitchCase>,
}

/// A switch case clause.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// The test expression (None for default)
    pub test: Option<Expression>,
    /// The consequent statements
    pub consequent: Vec<Statement>,
}

/// A while statement.
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    /// The condition
    pub test: Expression,
    /// The loop body
    pub body: Box<Statement>,
}

/// A do-while statement.
#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStatement {
    /// The loop body
    pub body: Box<Statement>,
    /// The condition
    pub test: Expression,
}

/// A for statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    /// The initializer
    pub init: Option<ForInit>,
    /// The condition
    pub test: Option<Expression>,
    /// The update expression
    pub update: Option<Expression>,
    /// The loop body
    pub body: Box<Statement>,
}

/// For loop initializer.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    /// Variable declaration
    Declaration(VariableDeclaration),
    /// Expression
    Expression(Expression),
}

/// A for-in statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ForInStatement {
    /// The left-hand side
    pub left: ForInLeft,
    /// The object to iterate over
    pub right: Expression,
    /// The loop body
    pub body: Box<Statement>,
}

/// A for-of statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ForOfStatement {
    /// The left-hand side
    pub left: ForInLeft,
    /// The iterable
    pub right: Expression,
    /// The loop body
    pub body: Box<Statement>,
    /// Whether this is `for await`
    pub is_await: bool,
}

/// Left-hand side of for-in/for-of.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInLeft {
    /// Variable declaration with a single declarator and no initializer
    Declaration(VariableDeclaration),
    /// Assignment target
    Pattern(Pattern),
}

/// A return statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    /// The return value
    pub argument: Option<Expression>,
}

/// A throw statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStatement {
    /// The thrown expression
    pub argument: Expression,
}

/// A try statement.
#[derive(Debug, Clone, PartialEq)]
pub struct TryStatement {
    /// The try block
    pub block: BlockStatement,
    /// The catch clause
    pub handler: Option<CatchClause>,
    /// The finally block
    pub finalizer: Option<BlockStatement>,
}

/// A catch clause.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    /// The error binding, absent for `catch { ... }`
    pub param: Option<Pattern>,
    /// The catch body
    pub body: BlockStatement,
}

/// A labeled statement.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledStatement {
    /// The label identifier
    pub label: Identifier,
    /// The labeled body
    pub body: Box<Statement>,
}

// ---------------------------------------------------------------------------
// Module items
// ---------------------------------------------------------------------------

/// An import declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDeclaration {
    /// The bindings introduced; empty for a side-effect import
    pub specifiers: Vec<ImportSpecifier>,
    /// The module specifier string
    pub source: String,
}

/// One binding of an import declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifier {
    /// `import local from ...`
    Default(Identifier),
    /// `import * as local from ...`
    Namespace(Identifier),
    /// `import { imported as local } from ...`
    Named {
        /// The exported name in the source module
        imported: String,
        /// The local binding
        local: Identifier,
    },
}

/// `export <declaration>`, `export { a as b }` or `export { a } from "m"`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportNamedDeclaration {
    /// An exported declaration (variable, function or class)
    pub declaration: Option<Box<Statement>>,
    /// Export specifiers, used when there is no declaration
    pub specifiers: Vec<ExportSpecifier>,
    /// The re-export source
    pub source: Option<String>,
}

/// One entry of an export list.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSpecifier {
    /// The local binding (or the imported name for re-exports)
    pub local: String,
    /// The name visible to importers
    pub exported: String,
}

/// The value of an `export default` declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportDefaultDeclaration {
    /// `export default function [name]() {}`
    Function(Function),
    /// `export default class [name] {}`
    Class(Class),
    /// `export default <expression>;`
    Expression(Expression),
}

/// `export * from "m"` or `export * as ns from "m"`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportAllDeclaration {
    /// The namespace name for `export * as name`
    pub exported: Option<String>,
    /// The re-export source
    pub source: String,
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// A binding or assignment target.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// Plain identifier
    Identifier(Identifier),
    /// `{ a, b: c, ...rest }`
    Object(ObjectPattern),
    /// `[a, , b, ...rest]`
    Array(ArrayPattern),
    /// `target = default`
    Assign(AssignmentPattern),
    /// `...target`
    Rest(Box<Pattern>),
    /// Member expression target, only valid in assignments
    Expression(Box<Expression>),
}

/// An object destructuring pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPattern {
    /// The properties
    pub properties: Vec<ObjectPatternProperty>,
}

/// One entry of an object pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectPatternProperty {
    /// `key: value` or shorthand `key`
    Property {
        /// The property key
        key: PropertyKey,
        /// The target pattern
        value: Pattern,
        /// Whether written as shorthand
        shorthand: bool,
    },
    /// `...rest`
    Rest(Box<Pattern>),
}

/// An array destructuring pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPattern {
    /// The elements (None represents a hole)
    pub elements: Vec<Option<Pattern>>,
}

/// A pattern with a default value.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentPattern {
    /// The target
    pub left: Box<Pattern>,
    /// The default value
    pub right: Box<Expression>,
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// A JavaScript expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Literal value
    Literal(Literal),
    /// Identifier reference
    Identifier(Identifier),
    /// this keyword
    This,
    /// super keyword (as `super(...)` or `super.x`)
    Super,
    /// Array literal
    Array(ArrayExpression),
    /// Object literal
    Object(ObjectExpression),
    /// Binary or logical expression
    Binary(BinaryExpression),
    /// Unary expression
    Unary(UnaryExpression),
    /// Assignment expression
    Assignment(AssignmentExpression),
    /// Call expression
    Call(CallExpression),
    /// Member access expression
    Member(MemberExpression),
    /// The outermost node of an optional chain (`a?.b.c`)
    Chain(Box<Expression>),
    /// Conditional (ternary) expression
    Conditional(ConditionalExpression),
    /// Function expression
    Function(Function),
    /// Arrow function expression
    Arrow(ArrowFunctionExpression),
    /// Class expression
    Class(Class),
    /// new expression
    New(NewExpression),
    /// Update expression (++/--)
    Update(UpdateExpression),
    /// Sequence expression (comma operator)
    Sequence(SequenceExpression),
    /// `...argument` in array literals and argument lists
    Spread(Box<Expression>),
    /// Template literal
    Template(TemplateLiteral),
    /// Tagged template
    TaggedTemplate(TaggedTemplateExpression),
    /// `yield` or `yield*`
    Yield(YieldExpression),
    /// `await argument`
    Await(Box<Expression>),
    /// `import.meta` or `new.target`
    MetaProperty(MetaProperty),
    /// Dynamic `import(source)`
    ImportCall(Box<Expression>),
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Numeric literal
    Number(f64),
    /// String literal
    String(String),
    /// Boolean literal
    Boolean(bool),
    /// null literal
    Null,
    /// BigInt literal (digits, with any radix prefix)
    BigInt(String),
    /// Regular expression literal
    RegExp {
        /// Pattern between the slashes
        pattern: String,
        /// Flags
        flags: String,
    },
}

/// An array expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpression {
    /// The elements (None represents a hole)
    pub elements: Vec<Option<Expression>>,
}

/// An object expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectExpression {
    /// The properties
    pub properties: Vec<ObjectMember>,
}

/// One entry of an object literal.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectMember {
    /// Key/value pair, method or accessor
    Property(Property),
    /// `...expression`
    Spread(Expression),
}

/// How an object property was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// `key: value` or shorthand
    Init,
    /// `key() {}`; the value is a function expression
    Method,
    /// `get key() {}`
    Get,
    /// `set key(v) {}`
    Set,
}

/// An object property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// The property key
    pub key: PropertyKey,
    /// The property value
    pub value: Expression,
    /// How the property was written
    pub kind: PropertyKind,
    /// Whether this is shorthand syntax (`{ a }`)
    pub shorthand: bool,
}

/// A property key.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    /// Identifier key (any identifier name, keywords included)
    Identifier(Identifier),
    /// Literal key (string or numeric)
    Literal(Literal),
    /// Computed key `[expression]`
    Computed(Box<Expression>),
    /// Private class member `#name`
    Private(String),
}

/// A binary or logical expression.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    /// The operator
    pub operator: BinaryOperator,
    /// The left operand
    pub left: Box<Expression>,
    /// The right operand
    pub right: Box<Expression>,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Exponent,
    // Comparison
    Equal,
    NotEqual,
    StrictEqual,
    StrictNotEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    // Logical
    LogicalAnd,
    LogicalOr,
    NullishCoalescing,
    // Bitwise
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    // Other
    In,
    InstanceOf,
}

impl BinaryOperator {
    /// The source spelling of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Exponent => "**",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::StrictEqual => "===",
            BinaryOperator::StrictNotEqual => "!==",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanEqual => ">=",
            BinaryOperator::LogicalAnd => "&&",
            BinaryOperator::LogicalOr => "||",
            BinaryOperator::NullishCoalescing => "??",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::LeftShift => "<<",
            BinaryOperator::RightShift => ">>",
            BinaryOperator::UnsignedRightShift => ">>>",
            BinaryOperator::In => "in",
            BinaryOperator::InstanceOf => "instanceof",
        }
    }
}

/// A unary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    /// The operator
    pub operator: UnaryOperator,
    /// The operand
    pub argument: Box<Expression>,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// -
    Minus,
    /// +
    Plus,
    /// !
    LogicalNot,
    /// ~
    BitwiseNot,
    /// typeof
    Typeof,
    /// void
    Void,
    /// delete
    Delete,
}

impl UnaryOperator {
    /// The source spelling of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Minus => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::LogicalNot => "!",
            UnaryOperator::BitwiseNot => "~",
            UnaryOperator::Typeof => "typeof",
            UnaryOperator::Void => "void",
            UnaryOperator::Delete => "delete",
        }
    }
}

/// An assignment expression.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    /// The operator
    pub operator: AssignmentOperator,
    /// The target; destructuring patterns only appear with `=`
    pub left: Pattern,
    /// The right-hand side
    pub right: Box<Expression>,
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum AssignmentOperator {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,
    ExponentAssign,
    LeftShiftAssign,
    RightShiftAssign,
    UnsignedRightShiftAssign,
    BitwiseAndAssign,
    BitwiseOrAssign,
    BitwiseXorAssign,
    LogicalAndAssign,
    LogicalOrAssign,
    NullishCoalescingAssign,
}

impl AssignmentOperator {
    /// The source spelling of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::AddAssign => "+=",
            AssignmentOperator::SubtractAssign => "-=",
            AssignmentOperator::MultiplyAssign => "*=",
            AssignmentOperator::DivideAssign => "/=",
            AssignmentOperator::ModuloAssign => "%=",
            AssignmentOperator::ExponentAssign => "**=",
            AssignmentOperator::LeftShiftAssign => "<<=",
            AssignmentOperator::RightShiftAssign => ">>=",
            AssignmentOperator::UnsignedRightShiftAssign => ">>>=",
            AssignmentOperator::BitwiseAndAssign => "&=",
            AssignmentOperator::BitwiseOrAssign => "|=",
            AssignmentOperator::BitwiseXorAssign => "^=",
            AssignmentOperator::LogicalAndAssign => "&&=",
            AssignmentOperator::LogicalOrAssign => "||=",
            AssignmentOperator::NullishCoalescingAssign => "??=",
        }
    }
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    /// The function being called
    pub callee: Box<Expression>,
    /// The arguments
    pub arguments: Vec<Expression>,
    /// Whether called with `?.(`
    pub optional: bool,
}

/// A member access expression.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    /// The object
    pub object: Box<Expression>,
    /// The property
    pub property: MemberProperty,
    /// Whether accessed with `?.`
    pub optional: bool,
}

/// Member property.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberProperty {
    /// Identifier property (`a.b`)
    Identifier(Identifier),
    /// Computed property expression (`a[b]`)
    Expression(Box<Expression>),
    /// Private name (`a.#b`)
    Private(String),
}

/// A conditional (ternary) expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    /// The condition
    pub test: Box<Expression>,
    /// The consequent (if true)
    pub consequent: Box<Expression>,
    /// The alternate (if false)
    pub alternate: Box<Expression>,
}

/// An arrow function expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunctionExpression {
    /// Parameters
    pub params: Vec<Pattern>,
    /// Body (expression or block)
    pub body: ArrowBody,
    /// Whether async
    pub is_async: bool,
}

/// Arrow function body.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    /// Expression body
    Expression(Box<Expression>),
    /// Block body
    Block(Vec<Statement>),
}

/// A new expression.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpression {
    /// The constructor
    pub callee: Box<Expression>,
    /// The arguments
    pub arguments: Vec<Expression>,
}

/// An update expression (++/--)
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    /// The operator
    pub operator: UpdateOperator,
    /// The operand
    pub argument: Box<Expression>,
    /// Whether prefix (++x) or postfix (x++)
    pub prefix: bool,
}

/// Update operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperator {
    /// ++
    Increment,
    /// --
    Decrement,
}

/// A sequence expression (comma operator).
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceExpression {
    /// The expressions
    pub expressions: Vec<Expression>,
}

/// A template literal. There is always one more quasi than expression.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    /// The literal chunks
    pub quasis: Vec<TemplateElement>,
    /// The substitutions
    pub expressions: Vec<Expression>,
}

/// One literal chunk of a template.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateElement {
    /// Source text, printed back verbatim
    pub raw: String,
    /// Decoded text, absent when the chunk has an invalid escape
    pub cooked: Option<String>,
}

/// `` tag`...` ``
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedTemplateExpression {
    /// The tag function
    pub tag: Box<Expression>,
    /// The template
    pub quasi: TemplateLiteral,
}

/// `yield` / `yield*`
#[derive(Debug, Clone, PartialEq)]
pub struct YieldExpression {
    /// The yielded value
    pub argument: Option<Box<Expression>>,
    /// Whether this is `yield*`
    pub delegate: bool,
}

/// `import.meta` or `new.target`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaProperty {
    /// `import` or `new`
    pub meta: String,
    /// `meta` or `target`
    pub property: String,
}

impl Expression {
    /// Shorthand for an identifier reference.
    pub fn ident(name: impl Into<String>) -> Self {
        Expression::Identifier(Identifier::new(name))
    }

    /// Shorthand for a string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Expression::Literal(Literal::String(value.into()))
    }

    /// Shorthand for `object.property`.
    pub fn member(object: Expression, property: impl Into<String>) -> Self {
        Expression::Member(MemberExpression {
            object: Box::new(object),
            property: MemberProperty::Identifier(Identifier::new(property)),
            optional: false,
        })
    }

    /// Shorthand for `object[property]`.
    pub fn computed_member(object: Expression, property: Expression) -> Self {
        Expression::Member(MemberExpression {
            object: Box::new(object),
            property: MemberProperty::Expression(Box::new(property)),
            optional: false,
        })
    }

    /// Shorthand for `callee(arguments)`.
    pub fn call(callee: Expression, arguments: Vec<Expression>) -> Self {
        Expression::Call(CallExpression {
            callee: Box::new(callee),
            arguments,
            optional: false,
        })
    }

    /// Shorthand for `left = right`.
    pub fn assign(left: Expression, right: Expression) -> Self {
        Expression::Assignment(AssignmentExpression {
            operator: AssignmentOperator::Assign,
            left: Pattern::Expression(Box::new(left)),
            right: Box::new(right),
        })
    }
}

impl Statement {
    /// Wraps an expression in an expression statement.
    pub fn expression(expression: Expression) -> Self {
        Statement::Expression(ExpressionStatement { expression })
    }

    /// `const name = init;`
    pub fn constant(name: impl Into<String>, init: Expression) -> Self {
        Statement::VariableDeclaration(VariableDeclaration {
            kind: VariableKind::Const,
            declarations: vec![VariableDeclarator {
                id: Pattern::Identifier(Identifier::new(name)),
                init: Some(init),
            }],
        })
    }
}

// src/common/validation.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::common::error::AppError;

/// Erro de um único campo, com caminho separado por pontos (ex: `products.0.price`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

// ---
// Decodificação do payload
// ---

/// Converte o JSON bruto no payload tipado.
///
/// Se a conversão falhar, cada chave é testada isoladamente (descendo em
/// listas e objetos) para apontar exatamente quais campos têm tipo inválido.
/// Funciona porque todo payload parcial tem apenas campos opcionais.
pub fn decode_payload<P: DeserializeOwned>(payload: Value) -> Result<P, AppError> {
    let Value::Object(fields) = payload else {
        return Err(AppError::Validation(vec![FieldError::new(
            "",
            "Expected a JSON object",
        )]));
    };

    match serde_json::from_value::<P>(Value::Object(fields.clone())) {
        Ok(decoded) => Ok(decoded),
        Err(whole) => {
            let mut errors = Vec::new();
            for (key, value) in &fields {
                let wrap = |inner: Value| single_key(key, inner);
                locate::<P>(key, value, &wrap, false, &mut errors);
            }

            if errors.is_empty() {
                errors.push(FieldError::new("", whole.to_string()));
            }
            Err(AppError::Validation(errors))
        }
    }
}

fn single_key(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

// Decodifica `value` sozinho na posição `path` (via `wrap`) e, se falhar,
// desce nos filhos até achar a folha culpada.
//
// `stripped`: o objeto pai foi reduzido a este campo, então "missing field"
// vem dos irmãos removidos e não conta como erro deste valor.
fn locate<P: DeserializeOwned>(
    path: &str,
    value: &Value,
    wrap: &dyn Fn(Value) -> Value,
    stripped: bool,
    out: &mut Vec<FieldError>,
) {
    let Err(err) = serde_json::from_value::<P>(wrap(value.clone())) else {
        return;
    };
    if stripped && err.to_string().starts_with("missing field") {
        return;
    }

    let before = out.len();
    match value {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let inner = |v: Value| wrap(Value::Array(vec![v]));
                locate::<P>(&join_path(path, &index.to_string()), item, &inner, false, out);
            }
        }
        Value::Object(fields) => {
            for (key, field) in fields {
                let inner = |v: Value| wrap(single_key(key, v));
                locate::<P>(&join_path(path, key), field, &inner, true, out);
            }
        }
        _ => {}
    }

    if out.len() == before {
        out.push(FieldError::new(path, err.to_string()));
    }
}

// ---
// Campos de payload parcial
// ---

/// Um campo do payload: ausente, `null` explícito ou valor.
///
/// Nos structs de patch use `#[serde(default)]` no container para que
/// campos ausentes virem `Missing`.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Missing,
    Null,
    Value(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Missing
    }
}

impl<T> Field<T> {
    /// Ausente e `null` contam igual (campos opcionais no create).
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Value(v) => Some(v),
            Field::Missing | Field::Null => None,
        }
    }

    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.into_option().unwrap_or_default()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Field::Value(v),
            None => Field::Null,
        })
    }
}

/// Coleta de campos obrigatórios ausentes (ou `null`) no create.
#[derive(Debug, Default)]
pub struct Required {
    errors: Vec<FieldError>,
}

impl Required {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take<T>(&mut self, value: Field<T>, path: &str, message: &str) -> Option<T> {
        let value = value.into_option();
        if value.is_none() {
            self.errors.push(FieldError::new(path, message));
        }
        value
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

/// Mescla de um patch no documento atual (update).
///
/// Campo ausente não muda nada; `null` limpa um opcional, volta um campo com
/// padrão ao padrão e é erro num obrigatório.
#[derive(Debug, Default)]
pub struct Merge {
    errors: Vec<FieldError>,
}

impl Merge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required<T>(&mut self, slot: &mut T, value: Field<T>, path: &str, message: &str) {
        match value {
            Field::Missing => {}
            Field::Null => self.errors.push(FieldError::new(path, message)),
            Field::Value(v) => *slot = v,
        }
    }

    pub fn optional<T>(&mut self, slot: &mut Option<T>, value: Field<T>) {
        match value {
            Field::Missing => {}
            Field::Null => *slot = None,
            Field::Value(v) => *slot = Some(v),
        }
    }

    pub fn or_default<T: Default>(&mut self, slot: &mut T, value: Field<T>) {
        match value {
            Field::Missing => {}
            Field::Null => *slot = T::default(),
            Field::Value(v) => *slot = v,
        }
    }

    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

// ---
// Regras de campo (validator)
// ---

/// Roda as regras de `validator` e devolve a lista achatada de erros.
pub fn check<T: Validate>(value: &T) -> Result<(), AppError> {
    match value.validate() {
        Ok(()) => Ok(()),
        Err(errors) => Err(AppError::Validation(flatten_errors(&errors))),
    }
}

pub fn flatten_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    walk("", errors, &mut out);
    out.sort_by(|a, b| a.path.cmp(&b.path));
    out
}

fn walk(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = join_path(prefix, &camel_case(field));
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", err.code));
                    out.push(FieldError::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => walk(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    walk(&format!("{path}.{index}"), inner, out);
                }
            }
        }
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

// Os nomes vêm do struct Rust (snake_case); a API fala camelCase.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

// ---
// Validação Customizada
// ---
pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("Value cannot be negative".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Datas: aceita RFC 3339 ou YYYY-MM-DD (meia-noite UTC)
// ---
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Para campos de data em patches: `#[serde(deserialize_with = "deserialize_date_field")]`.
pub fn deserialize_date_field<'de, D>(deserializer: D) -> Result<Field<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(Field::Null),
        Some(raw) => parse_date(&raw).map(Field::Value).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid date '{raw}', expected RFC 3339 or YYYY-MM-DD"
            ))
        }),
    }
}

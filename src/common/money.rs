// src/common/money.rs

use rust_decimal::Decimal;
use validator::ValidationError;

// Colunas de dinheiro são NUMERIC(14, 2): até 12 dígitos inteiros
const MAX_AMOUNT_EXCLUSIVE: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0); // 10^12

// Medidas de peças são NUMERIC(10, 2)
const MAX_MEASURE_EXCLUSIVE: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0); // 10^8

const MIN_MEASURE: Decimal = Decimal::from_parts(1, 0, 0, false, 1); // 0.1

fn has_cents_at_most(value: &Decimal) -> bool {
    value.normalize().scale() <= 2
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Valor monetário opcional: zero ou mais, cabe na coluna, no máximo 2 casas.
pub fn validate_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(error("non_negative", "O valor não pode ser negativo."));
    }
    if *value >= MAX_AMOUNT_EXCLUSIVE {
        return Err(error("max_amount", "O valor excede o limite permitido."));
    }
    if !has_cents_at_most(value) {
        return Err(error("scale", "O valor deve ter no máximo 2 casas decimais."));
    }
    Ok(())
}

/// Como `validate_amount`, mas zero não vale (orçamentos).
pub fn validate_positive_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(error("positive", "O valor deve ser positivo."));
    }
    validate_amount(value)
}

pub fn validate_percentage(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() || *value > Decimal::ONE_HUNDRED {
        return Err(error("percentage", "O percentual deve estar entre 0 e 100."));
    }
    if !has_cents_at_most(value) {
        return Err(error("scale", "O percentual deve ter no máximo 2 casas decimais."));
    }
    Ok(())
}

/// Altura, largura e profundidade de peças (cm).
pub fn validate_measure(value: &Decimal) -> Result<(), ValidationError> {
    if *value < MIN_MEASURE {
        return Err(error("min_measure", "A medida deve ser de no mínimo 0,1."));
    }
    if *value >= MAX_MEASURE_EXCLUSIVE {
        return Err(error("max_measure", "A medida excede o limite permitido."));
    }
    if !has_cents_at_most(value) {
        return Err(error("scale", "A medida deve ter no máximo 2 casas decimais."));
    }
    Ok(())
}

//! AFIP code tables used by WSFEv1.
//!
//! Each coded domain is modelled as an enum with `code()`/`from_code()`
//! conversions matching the values published in the service's parameter
//! tables (`FEParamGetTipos*`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Concepto — what the invoice covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Concept {
    /// 1 — Productos.
    Products,
    /// 2 — Servicios.
    Services,
    /// 3 — Productos y servicios.
    ProductsAndServices,
}

impl Concept {
    pub fn code(&self) -> u16 {
        match self {
            Self::Products => 1,
            Self::Services => 2,
            Self::ProductsAndServices => 3,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(Self::Products),
            2 => Some(Self::Services),
            3 => Some(Self::ProductsAndServices),
            _ => None,
        }
    }

    /// Whether the concept includes services (which require a service
    /// period and payment due date on the request).
    pub fn includes_services(&self) -> bool {
        matches!(self, Self::Services | Self::ProductsAndServices)
    }
}

/// DocTipo — identity document type of the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocType {
    /// 80 — CUIT.
    Cuit,
    /// 86 — CUIL.
    Cuil,
    /// 96 — DNI.
    Dni,
    /// 99 — Consumidor final (no identified receiver).
    ConsumidorFinal,
    /// Other code value from the parameter table.
    Other(u16),
}

impl DocType {
    pub fn code(&self) -> u16 {
        match self {
            Self::Cuit => 80,
            Self::Cuil => 86,
            Self::Dni => 96,
            Self::ConsumidorFinal => 99,
            Self::Other(c) => *c,
        }
    }

    pub fn from_code(code: u16) -> Self {
        match code {
            80 => Self::Cuit,
            86 => Self::Cuil,
            96 => Self::Dni,
            99 => Self::ConsumidorFinal,
            c => Self::Other(c),
        }
    }
}

/// CbteTipo — invoice (comprobante) type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceType {
    /// 1 — Factura A.
    FacturaA,
    /// 2 — Nota de Débito A.
    NotaDebitoA,
    /// 3 — Nota de Crédito A.
    NotaCreditoA,
    /// 6 — Factura B.
    FacturaB,
    /// 7 — Nota de Débito B.
    NotaDebitoB,
    /// 8 — Nota de Crédito B.
    NotaCreditoB,
    /// 11 — Factura C.
    FacturaC,
    /// 12 — Nota de Débito C.
    NotaDebitoC,
    /// 13 — Nota de Crédito C.
    NotaCreditoC,
    /// Other code value from the parameter table.
    Other(u16),
}

impl InvoiceType {
    pub fn code(&self) -> u16 {
        match self {
            Self::FacturaA => 1,
            Self::NotaDebitoA => 2,
            Self::NotaCreditoA => 3,
            Self::FacturaB => 6,
            Self::NotaDebitoB => 7,
            Self::NotaCreditoB => 8,
            Self::FacturaC => 11,
            Self::NotaDebitoC => 12,
            Self::NotaCreditoC => 13,
            Self::Other(c) => *c,
        }
    }

    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::FacturaA,
            2 => Self::NotaDebitoA,
            3 => Self::NotaCreditoA,
            6 => Self::FacturaB,
            7 => Self::NotaDebitoB,
            8 => Self::NotaCreditoB,
            11 => Self::FacturaC,
            12 => Self::NotaDebitoC,
            13 => Self::NotaCreditoC,
            c => Self::Other(c),
        }
    }

    /// Whether this type is a credit or debit note, which must reference
    /// the invoices it adjusts via `CbtesAsoc`.
    pub fn is_note(&self) -> bool {
        matches!(
            self,
            Self::NotaDebitoA
                | Self::NotaCreditoA
                | Self::NotaDebitoB
                | Self::NotaCreditoB
                | Self::NotaDebitoC
                | Self::NotaCreditoC
        )
    }
}

/// AlicIva Id — VAT rate codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VatRate {
    /// 3 — 0%.
    Zero,
    /// 9 — 2.5%.
    Reduced2_5,
    /// 8 — 5%.
    Reduced5,
    /// 4 — 10.5%.
    Reduced10_5,
    /// 5 — 21% (general rate).
    Standard21,
    /// 6 — 27%.
    Increased27,
}

impl VatRate {
    pub fn code(&self) -> u16 {
        match self {
            Self::Zero => 3,
            Self::Reduced2_5 => 9,
            Self::Reduced5 => 8,
            Self::Reduced10_5 => 4,
            Self::Standard21 => 5,
            Self::Increased27 => 6,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            3 => Some(Self::Zero),
            9 => Some(Self::Reduced2_5),
            8 => Some(Self::Reduced5),
            4 => Some(Self::Reduced10_5),
            5 => Some(Self::Standard21),
            6 => Some(Self::Increased27),
            _ => None,
        }
    }

    /// Percentage this rate represents.
    pub fn percentage(&self) -> Decimal {
        match self {
            Self::Zero => Decimal::ZERO,
            Self::Reduced2_5 => Decimal::new(25, 1),
            Self::Reduced5 => Decimal::new(5, 0),
            Self::Reduced10_5 => Decimal::new(105, 1),
            Self::Standard21 => Decimal::new(21, 0),
            Self::Increased27 => Decimal::new(27, 0),
        }
    }
}

/// Tributo Id — non-VAT tax kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxKind {
    /// 1 — Impuestos nacionales.
    National,
    /// 2 — Impuestos provinciales.
    Provincial,
    /// 3 — Impuestos municipales.
    Municipal,
    /// 4 — Impuestos internos.
    Excise,
    /// 99 — Otros.
    Other,
}

impl TaxKind {
    pub fn code(&self) -> u16 {
        match self {
            Self::National => 1,
            Self::Provincial => 2,
            Self::Municipal => 3,
            Self::Excise => 4,
            Self::Other => 99,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(Self::National),
            2 => Some(Self::Provincial),
            3 => Some(Self::Municipal),
            4 => Some(Self::Excise),
            99 => Some(Self::Other),
            _ => None,
        }
    }
}

/// Check whether `id` is a known MonId currency identifier.
///
/// Subset of the `FEParamGetTiposMonedas` table covering the currencies
/// commonly seen on domestic invoices.
pub fn is_known_currency_id(id: &str) -> bool {
    CURRENCY_IDS.binary_search(&id).is_ok()
}

/// Sorted for binary search.
static CURRENCY_IDS: &[&str] = &[
    "012", // Real
    "060", // Euro
    "DOL", // Dólar estadounidense
    "PES", // Pesos argentinos
];

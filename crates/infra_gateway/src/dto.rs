//! Wire data transfer objects for the remote invoicing API
//!
//! Field names reproduce the remote API's JSON exactly (camelCase invoice
//! fields, `_id`/`ClientName`/`Wallet` in the address book). Conversions
//! into domain types are fallible: anything the API sends that cannot be
//! represented becomes a [`PortError::Transformation`], and date strings
//! are parsed into real dates at this boundary.

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, InvoiceId, PortError, Rate, WalletAddress};
use domain_invoice::{Counterparty, CreateInvoiceRequest, Invoice, ResolvedInvoice};

/// `GET /api/address-book` response
#[derive(Debug, Clone, Deserialize)]
pub struct AddressBookResponse {
    pub addresses: Vec<AddressBookEntry>,
}

/// One address-book entry
#[derive(Debug, Clone, Deserialize)]
pub struct AddressBookEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "ClientName")]
    pub client_name: String,
    #[serde(rename = "Wallet", default)]
    pub wallet: Option<String>,
}

impl AddressBookEntry {
    /// Converts into a domain counterparty
    pub fn try_into_domain(self) -> Result<Counterparty, PortError> {
        let wallet = self
            .wallet
            .map(|raw| {
                WalletAddress::parse(&raw).map_err(|err| {
                    PortError::transformation(format!(
                        "address book entry {}: {}",
                        self.id, err
                    ))
                })
            })
            .transpose()?;

        Ok(Counterparty {
            id: self.id,
            name: self.client_name,
            wallet,
        })
    }
}

/// `GET /api/create-shorten-url` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenUrlResponse {
    pub shorten_url: ShortenUrlRecord,
    pub client_address: ClientAddressRecord,
}

/// The shorten-url envelope; `invoiceId` is the populated invoice record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenUrlRecord {
    pub invoice_id: InvoiceRecord,
}

/// The resolved client address envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientAddressRecord {
    pub bill_to: BillToRecord,
}

/// The payee wallet carried inside the client address
#[derive(Debug, Clone, Deserialize)]
pub struct BillToRecord {
    #[serde(rename = "Wallet")]
    pub wallet: String,
}

impl ShortenUrlResponse {
    /// Converts into the domain resolution result
    pub fn try_into_domain(self) -> Result<ResolvedInvoice, PortError> {
        let payee = WalletAddress::parse(&self.client_address.bill_to.wallet)
            .map_err(|err| PortError::transformation(format!("payee wallet: {err}")))?;

        Ok(ResolvedInvoice {
            invoice: self.shorten_url.invoice_id.try_into_domain()?,
            payee,
        })
    }
}

/// `POST /api/invoice` response
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceResponse {
    pub invoice: InvoiceRecord,
}

/// An invoice as it travels over the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub invoice_name: String,
    pub bill_to: String,
    pub from: String,
    pub invoice_currency: String,
    #[serde(default)]
    pub wallet: Option<String>,
    pub item: String,
    pub quantity: u32,
    pub price: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub note: String,
    pub issue_date: String,
    pub due_date: String,
}

impl InvoiceRecord {
    /// Converts the stored record into a domain invoice
    pub fn try_into_domain(self) -> Result<Invoice, PortError> {
        let id = self
            .id
            .map(|raw| {
                raw.parse::<InvoiceId>().map_err(|err| {
                    PortError::transformation(format!("invoice id {raw}: {err}"))
                })
            })
            .transpose()?;

        let currency: Currency = self
            .invoice_currency
            .parse()
            .map_err(|err| PortError::transformation(format!("currency: {err}")))?;

        let wallet = self
            .wallet
            .map(|raw| {
                WalletAddress::parse(&raw)
                    .map_err(|err| PortError::transformation(format!("payer wallet: {err}")))
            })
            .transpose()?;

        let discount = Rate::try_from_percent(self.discount)
            .map_err(|err| PortError::transformation(format!("discount: {err}")))?;
        let tax = Rate::try_from_percent(self.tax)
            .map_err(|err| PortError::transformation(format!("tax: {err}")))?;

        Ok(Invoice {
            id,
            name: self.invoice_name,
            bill_to: self.bill_to,
            from: self.from,
            currency,
            wallet,
            item: self.item,
            quantity: self.quantity,
            unit_price: self.price,
            discount,
            tax,
            note: self.note,
            issue_date: parse_wire_date(&self.issue_date)?,
            due_date: parse_wire_date(&self.due_date)?,
        })
    }

    /// Builds the wire record for a create-invoice request
    pub fn from_request(request: &CreateInvoiceRequest) -> Self {
        Self {
            id: None,
            invoice_name: request.name.clone(),
            bill_to: request.bill_to.clone(),
            from: request.from.clone(),
            invoice_currency: request.currency.code().to_string(),
            wallet: Some(request.wallet.to_string()),
            item: request.item.clone(),
            quantity: request.quantity,
            price: request.unit_price.amount(),
            discount: request.discount.as_percent(),
            tax: request.tax.as_percent(),
            total: request.total.amount(),
            note: request.note.clone(),
            issue_date: format_wire_date(request.issue_date),
            due_date: format_wire_date(request.due_date),
        }
    }
}

/// Parses a stored date representation into a calendar date
///
/// The API stores full RFC 3339 timestamps; plain `YYYY-MM-DD` is accepted
/// as well.
pub fn parse_wire_date(raw: &str) -> Result<NaiveDate, PortError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|err| PortError::transformation(format!("date {raw}: {err}")))
}

/// Formats a calendar date the way the API stores it
pub fn format_wire_date(date: NaiveDate) -> String {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight is valid"))
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_address_book_response_shape() {
        let json = r#"{
            "addresses": [
                { "_id": "64f0c2a7", "ClientName": "Acme Studio",
                  "Wallet": "0x3333333333333333333333333333333333333333" },
                { "_id": "64f0c2b9", "ClientName": "North Labs" }
            ]
        }"#;

        let response: AddressBookResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.addresses.len(), 2);

        let first = response.addresses[0].clone().try_into_domain().unwrap();
        assert_eq!(first.id, "64f0c2a7");
        assert_eq!(first.name, "Acme Studio");
        assert!(first.wallet.is_some());

        let second = response.addresses[1].clone().try_into_domain().unwrap();
        assert!(second.wallet.is_none());
    }

    #[test]
    fn test_shorten_url_response_shape() {
        let json = r#"{
            "shortenUrl": {
                "invoiceId": {
                    "invoiceName": "Invoice #42",
                    "billTo": "64f0c2a7",
                    "from": "From Info",
                    "invoiceCurrency": "MATIC",
                    "wallet": "0x1111111111111111111111111111111111111111",
                    "item": "Design work",
                    "quantity": 2,
                    "price": 100,
                    "discount": 10,
                    "tax": 5,
                    "total": 189,
                    "note": "",
                    "issueDate": "2024-03-01T00:00:00.000Z",
                    "dueDate": "2024-03-31T00:00:00.000Z"
                }
            },
            "clientAddress": {
                "billTo": { "Wallet": "0x2222222222222222222222222222222222222222" }
            }
        }"#;

        let response: ShortenUrlResponse = serde_json::from_str(json).unwrap();
        let resolved = response.try_into_domain().unwrap();

        assert_eq!(resolved.invoice.name, "Invoice #42");
        assert_eq!(resolved.invoice.currency, Currency::Matic);
        // Dates are real dates, parsed from the stored representation
        assert_eq!(
            resolved.invoice.issue_date,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(
            resolved.invoice.due_date,
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
        );
        assert_eq!(
            resolved.payee.as_str(),
            "0x2222222222222222222222222222222222222222"
        );
        assert_eq!(resolved.invoice.total().amount(), dec!(189.00));
    }

    #[test]
    fn test_wire_date_parsing_accepts_both_forms() {
        assert_eq!(
            parse_wire_date("2024-03-01T12:30:45.000Z").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(
            parse_wire_date("2024-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert!(parse_wire_date("yesterday").is_err());
    }

    #[test]
    fn test_malformed_wallet_is_a_transformation_error() {
        let entry = AddressBookEntry {
            id: "64f0c2a7".to_string(),
            client_name: "Acme Studio".to_string(),
            wallet: Some("not-an-address".to_string()),
        };

        let result = entry.try_into_domain();
        assert!(matches!(result, Err(PortError::Transformation { .. })));
    }

    #[test]
    fn test_out_of_range_rate_is_a_transformation_error() {
        let json = r#"{
            "invoiceName": "x", "billTo": "c", "from": "f",
            "invoiceCurrency": "USD", "item": "i",
            "quantity": 1, "price": 1, "discount": 250, "tax": 0, "total": 1,
            "note": "", "issueDate": "2024-03-01", "dueDate": "2024-03-02"
        }"#;
        let record: InvoiceRecord = serde_json::from_str(json).unwrap();

        assert!(matches!(
            record.try_into_domain(),
            Err(PortError::Transformation { .. })
        ));
    }

    #[test]
    fn test_create_request_serializes_with_wire_names() {
        let request = CreateInvoiceRequest {
            name: "Invoice #1".to_string(),
            bill_to: "64f0c2a7".to_string(),
            from: "From Info".to_string(),
            currency: Currency::Usd,
            wallet: WalletAddress::parse("0x1111111111111111111111111111111111111111").unwrap(),
            item: "Design work".to_string(),
            quantity: 2,
            unit_price: core_kernel::Money::new(dec!(100), Currency::Usd),
            discount: Rate::from_percent(dec!(10)),
            tax: Rate::from_percent(dec!(5)),
            total: core_kernel::Money::new(dec!(189), Currency::Usd),
            note: String::new(),
            issue_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        };

        let record = InvoiceRecord::from_request(&request);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["invoiceName"], "Invoice #1");
        assert_eq!(json["billTo"], "64f0c2a7");
        assert_eq!(json["invoiceCurrency"], "USD");
        assert_eq!(json["issueDate"], "2024-03-01T00:00:00.000Z");
        assert!(json.get("_id").is_none());
        assert_eq!(json["discount"], serde_json::json!(dec!(10)));
    }
}

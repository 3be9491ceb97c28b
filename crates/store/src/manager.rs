//! Stateful facade over the repository.
//!
//! Every mutation reads the collections it needs, computes the new
//! collections with the pure services from `factura-core`, and writes them
//! back. Nothing is cached between calls: the store is the single source of
//! truth and last write wins.

use chrono::{Datelike, NaiveDate};
use factura_core::catalog::{
    Client, ClientDraft, CompanyInfo, ImportSummary, Product, ProductDraft,
    merge_imported_clients,
};
use factura_core::document::{
    Document, DocumentDraft, DocumentError, DocumentKind, DocumentRef, Invoice, InvoiceDraft,
    LineItem, LineItems, Quote, QuoteDraft, QuoteStatus, RecordKind,
};
use factura_core::lifecycle::LifecycleService;
use factura_core::numbering::{next_number, try_parse_sequence};
use factura_core::payment::{
    NewPayment, Payment, PaymentOutcome, Reconciliation, ReconciliationService,
};
use factura_core::reports::{ClientAccountSummary, DashboardSummary, QuoteExpiry, ReportService};
use factura_core::totals::{DocumentTotals, compute_totals};
use factura_shared::config::{DocumentConfig, NumberingConfig};
use factura_shared::types::{ClientId, InvoiceId, ProductId, QuoteId};
use factura_shared::AppConfig;
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::backend::KeyValueStore;
use crate::clock::{Clock, SystemClock};
use crate::error::StoreResult;
use crate::repository::Repository;

/// One row of the quote listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRow {
    /// The quote.
    pub quote: Quote,
    /// Its totals, recomputed from the items.
    pub totals: DocumentTotals,
    /// Expiry indicator for open quotes.
    pub expiry: Option<QuoteExpiry>,
}

/// Document manager: numbering, saving, payments, conversion and archiving.
#[derive(Debug)]
pub struct DocumentManager<S, C = SystemClock> {
    repository: Repository<S>,
    clock: C,
    numbering: NumberingConfig,
    documents: DocumentConfig,
}

impl<S: KeyValueStore, C: Clock> DocumentManager<S, C> {
    /// Creates a manager over `repository`.
    #[must_use]
    pub fn new(repository: Repository<S>, clock: C, config: &AppConfig) -> Self {
        Self {
            repository,
            clock,
            numbering: config.numbering.clone(),
            documents: config.documents.clone(),
        }
    }

    /// Returns the repository.
    #[must_use]
    pub fn repository(&self) -> &Repository<S> {
        &self.repository
    }

    /// Returns the repository for direct mutation.
    pub fn repository_mut(&mut self) -> &mut Repository<S> {
        &mut self.repository
    }

    /// Today's date according to the manager's clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ------------------------------------------------------------------
    // Numbering and totals
    // ------------------------------------------------------------------

    /// Proposes the next quote number for the current year.
    pub fn next_quote_number(&self) -> StoreResult<String> {
        let quotes = self.repository.load_quotes()?;
        Ok(self.next_in_sequence(
            &self.numbering.quote_prefix,
            quotes.iter().map(|quote| quote.quote_number.as_str()),
        ))
    }

    /// Proposes the next invoice number for the current year.
    pub fn next_invoice_number(&self) -> StoreResult<String> {
        let invoices = self.repository.load_invoices()?;
        Ok(self.next_in_sequence(
            &self.numbering.invoice_prefix,
            invoices.iter().map(|invoice| invoice.invoice_number.as_str()),
        ))
    }

    fn next_in_sequence<'a>(&self, prefix: &str, numbers: impl Iterator<Item = &'a str>) -> String {
        let year = self.today().year();
        let year_prefix = format!("{prefix}-{year}-");
        let numbers: Vec<&str> = numbers.collect();

        for number in numbers.iter().filter(|n| n.starts_with(&year_prefix)) {
            if try_parse_sequence(number).is_none() {
                debug!(number = %number, "Malformed document number counted as 0");
            }
        }

        next_number(prefix, numbers, year)
    }

    /// Computes subtotal, tax total and grand total of `items`.
    #[must_use]
    pub fn compute_totals(items: &[LineItem]) -> DocumentTotals {
        compute_totals(items)
    }

    // ------------------------------------------------------------------
    // Creating and saving documents
    // ------------------------------------------------------------------

    /// Creates an unsaved quote skeleton with a proposed number.
    ///
    /// The number is computed now, against the current collection, and is
    /// not recomputed at save time. Without a client, the first stored
    /// client is preselected.
    pub fn new_quote(&self, client_id: Option<ClientId>) -> StoreResult<QuoteDraft> {
        Ok(LifecycleService::new_quote_draft(
            self.next_quote_number()?,
            self.client_or_first(client_id)?,
            self.today(),
            self.documents.validity_days,
        ))
    }

    /// Creates an unsaved invoice skeleton with a proposed number.
    pub fn new_invoice(&self, client_id: Option<ClientId>) -> StoreResult<InvoiceDraft> {
        Ok(LifecycleService::new_invoice_draft(
            self.next_invoice_number()?,
            self.client_or_first(client_id)?,
            self.today(),
            self.documents.validity_days,
        ))
    }

    fn client_or_first(&self, client_id: Option<ClientId>) -> StoreResult<Option<ClientId>> {
        match client_id {
            Some(id) => Ok(Some(id)),
            None => Ok(self
                .repository
                .load_clients()?
                .first()
                .map(|client| client.id)),
        }
    }

    /// Creates an unsaved skeleton of either kind.
    pub fn new_document(
        &self,
        kind: DocumentKind,
        client_id: Option<ClientId>,
    ) -> StoreResult<DocumentDraft> {
        Ok(match kind {
            DocumentKind::Quote => DocumentDraft::Quote(self.new_quote(client_id)?),
            DocumentKind::Invoice => DocumentDraft::Invoice(self.new_invoice(client_id)?),
        })
    }

    /// Saves a quote draft.
    ///
    /// A draft without id gets a fresh one and is appended; a draft whose id
    /// exists replaces that quote in place. The edit path can neither set nor
    /// leave `Archived`.
    pub fn save_quote(&mut self, draft: QuoteDraft) -> StoreResult<Quote> {
        let mut quotes = self.repository.load_quotes()?;
        let position = draft
            .id
            .and_then(|id| quotes.iter().position(|quote| quote.id == id));
        let stored_status = position.map(|index| quotes[index].status);

        LifecycleService::validate_quote_edit(stored_status, draft.status)?;

        let id = draft.id.unwrap_or_else(QuoteId::new);
        let quote = draft.into_quote(id)?;

        match position {
            Some(index) => quotes[index] = quote.clone(),
            None => quotes.push(quote.clone()),
        }
        self.repository.save_quotes(&quotes)?;

        info!(
            quote_id = %quote.id,
            number = %quote.quote_number,
            status = %quote.status,
            replaced = position.is_some(),
            "Quote saved"
        );
        Ok(quote)
    }

    /// Saves an invoice draft.
    ///
    /// With `reconcile_on_save`, the requested status is settled against the
    /// recorded payments so a manual edit cannot drift from them.
    pub fn save_invoice(&mut self, draft: InvoiceDraft) -> StoreResult<Invoice> {
        let mut invoices = self.repository.load_invoices()?;
        let position = draft
            .id
            .and_then(|id| invoices.iter().position(|invoice| invoice.id == id));

        let id = draft.id.unwrap_or_else(InvoiceId::new);
        let mut invoice = draft.into_invoice(id)?;

        if self.documents.reconcile_on_save {
            let payments = self.repository.load_payments()?;
            let reconciliation = ReconciliationService::reconcile(&invoice, &payments);
            let settled = ReconciliationService::settle_edited_status(
                invoice.status,
                reconciliation.total_paid,
                reconciliation.grand_total,
            );
            if settled != invoice.status {
                warn!(
                    invoice_id = %invoice.id,
                    requested = %invoice.status,
                    settled = %settled,
                    "Edited invoice status overridden by recorded payments"
                );
                invoice.status = settled;
            }
        }

        match position {
            Some(index) => invoices[index] = invoice.clone(),
            None => invoices.push(invoice.clone()),
        }
        self.repository.save_invoices(&invoices)?;

        info!(
            invoice_id = %invoice.id,
            number = %invoice.invoice_number,
            status = %invoice.status,
            replaced = position.is_some(),
            "Invoice saved"
        );
        Ok(invoice)
    }

    /// Saves a draft of either kind.
    pub fn save_document(&mut self, draft: DocumentDraft) -> StoreResult<Document> {
        Ok(match draft {
            DocumentDraft::Quote(draft) => Document::Quote(self.save_quote(draft)?),
            DocumentDraft::Invoice(draft) => Document::Invoice(self.save_invoice(draft)?),
        })
    }

    // ------------------------------------------------------------------
    // Deleting documents
    // ------------------------------------------------------------------

    /// Deletes a quote. Invoices converted from it keep a dangling `quote_id`.
    pub fn delete_quote(&mut self, id: QuoteId) -> StoreResult<Quote> {
        let mut quotes = self.repository.load_quotes()?;
        let position = quotes
            .iter()
            .position(|quote| quote.id == id)
            .ok_or_else(|| DocumentError::not_found(RecordKind::Quote, id))?;
        let removed = quotes.remove(position);
        self.repository.save_quotes(&quotes)?;

        info!(quote_id = %id, number = %removed.quote_number, "Quote deleted");
        Ok(removed)
    }

    /// Deletes an invoice and every payment recorded against it.
    ///
    /// Returns the deleted invoice and the number of payments removed. If
    /// the payments cannot be written, the invoice collection is restored.
    pub fn delete_invoice(&mut self, id: InvoiceId) -> StoreResult<(Invoice, usize)> {
        let original_invoices = self.repository.load_invoices()?;
        let position = original_invoices
            .iter()
            .position(|invoice| invoice.id == id)
            .ok_or_else(|| DocumentError::not_found(RecordKind::Invoice, id))?;

        let mut invoices = original_invoices.clone();
        let removed = invoices.remove(position);

        let mut payments = self.repository.load_payments()?;
        let before = payments.len();
        payments.retain(|payment| payment.invoice_id != id);
        let removed_payments = before - payments.len();

        self.repository.save_invoices(&invoices)?;
        if let Err(err) = self.repository.save_payments(&payments) {
            self.restore_invoices(&original_invoices);
            return Err(err);
        }

        info!(
            invoice_id = %id,
            number = %removed.invoice_number,
            payments_removed = removed_payments,
            "Invoice deleted"
        );
        Ok((removed, removed_payments))
    }

    /// Deletes a document of either kind.
    pub fn delete_document(&mut self, document: DocumentRef) -> StoreResult<()> {
        match document {
            DocumentRef::Quote(id) => {
                self.delete_quote(id)?;
            }
            DocumentRef::Invoice(id) => {
                self.delete_invoice(id)?;
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Payments
    // ------------------------------------------------------------------

    /// Records a payment and writes the derived status onto its invoice.
    ///
    /// Payments are written first, then invoices. If the invoice write
    /// fails, the previous payment collection is written back so no payment
    /// survives without its status recompute.
    pub fn record_payment(
        &mut self,
        invoice_id: InvoiceId,
        payment: NewPayment,
    ) -> StoreResult<PaymentOutcome> {
        let mut invoices = self.repository.load_invoices()?;
        let position = invoices
            .iter()
            .position(|invoice| invoice.id == invoice_id)
            .ok_or_else(|| DocumentError::not_found(RecordKind::Invoice, invoice_id))?;
        let previous_payments = self.repository.load_payments()?;

        let outcome =
            ReconciliationService::apply_payment(&invoices[position], &previous_payments, payment)?;
        if outcome.reconciliation.is_overpaid() {
            warn!(
                invoice_id = %invoice_id,
                total_paid = %outcome.reconciliation.total_paid,
                grand_total = %outcome.reconciliation.grand_total,
                "Invoice overpaid"
            );
        }

        self.repository.save_payments(&outcome.payments)?;
        invoices[position] = outcome.invoice.clone();
        if let Err(err) = self.repository.save_invoices(&invoices) {
            if let Err(rollback) = self.repository.save_payments(&previous_payments) {
                error!(
                    error = %rollback,
                    invoice_id = %invoice_id,
                    "Failed to roll back payment after invoice write failure"
                );
            }
            return Err(err);
        }

        info!(
            invoice_id = %invoice_id,
            payment_id = %outcome.payment.id,
            amount = %outcome.payment.amount,
            status = %outcome.invoice.status,
            balance_due = %outcome.reconciliation.balance_due,
            "Payment recorded"
        );
        Ok(outcome)
    }

    /// Current paid-to-date and balance of an invoice, with its stored status.
    pub fn invoice_balance(&self, invoice_id: InvoiceId) -> StoreResult<Reconciliation> {
        let invoice = self.find_invoice(invoice_id)?;
        let payments = self.repository.load_payments()?;
        Ok(ReconciliationService::balance(&invoice, &payments))
    }

    /// Amount proposed for the next payment on an invoice.
    pub fn suggested_payment(&self, invoice_id: InvoiceId) -> StoreResult<Decimal> {
        let invoice = self.find_invoice(invoice_id)?;
        let payments = self.repository.load_payments()?;
        Ok(ReconciliationService::suggested_amount(&invoice, &payments))
    }

    /// Payments recorded against an invoice, oldest first.
    pub fn payments_for(&self, invoice_id: InvoiceId) -> StoreResult<Vec<Payment>> {
        let mut payments: Vec<Payment> = self
            .repository
            .load_payments()?
            .into_iter()
            .filter(|payment| payment.invoice_id == invoice_id)
            .collect();
        payments.sort_by_key(|payment| payment.date);
        Ok(payments)
    }

    // ------------------------------------------------------------------
    // Conversion and archiving
    // ------------------------------------------------------------------

    /// Converts a quote into a new invoice and marks the quote `Accepted`.
    ///
    /// The invoice is written first, then the quote. If the quote write
    /// fails, the invoice collection is restored.
    pub fn convert_quote_to_invoice(&mut self, quote_id: QuoteId) -> StoreResult<Invoice> {
        let mut quotes = self.repository.load_quotes()?;
        let position = quotes
            .iter()
            .position(|quote| quote.id == quote_id)
            .ok_or_else(|| DocumentError::not_found(RecordKind::Quote, quote_id))?;

        let invoice_number = self.next_invoice_number()?;
        let conversion = LifecycleService::convert_to_invoice(
            &quotes[position],
            invoice_number,
            self.today(),
            self.documents.validity_days,
        )?;

        let original_invoices = self.repository.load_invoices()?;
        let mut invoices = original_invoices.clone();
        invoices.push(conversion.invoice.clone());
        self.repository.save_invoices(&invoices)?;

        quotes[position] = conversion.quote;
        if let Err(err) = self.repository.save_quotes(&quotes) {
            self.restore_invoices(&original_invoices);
            return Err(err);
        }

        info!(
            quote_id = %quote_id,
            invoice_id = %conversion.invoice.id,
            number = %conversion.invoice.invoice_number,
            "Quote converted to invoice"
        );
        Ok(conversion.invoice)
    }

    /// Archives a quote. Only `Accepted` and `Rejected` quotes can be
    /// archived; archiving an archived quote changes nothing.
    pub fn archive_quote(&mut self, quote_id: QuoteId) -> StoreResult<Quote> {
        let mut quotes = self.repository.load_quotes()?;
        let quote = quotes
            .iter_mut()
            .find(|quote| quote.id == quote_id)
            .ok_or_else(|| DocumentError::not_found(RecordKind::Quote, quote_id))?;

        let outcome = LifecycleService::archive(quote.status)?;
        if !outcome.changed() {
            debug!(quote_id = %quote_id, "Quote already archived");
            return Ok(quote.clone());
        }

        quote.status = QuoteStatus::Archived;
        let archived = quote.clone();
        self.repository.save_quotes(&quotes)?;

        info!(quote_id = %quote_id, number = %archived.quote_number, "Quote archived");
        Ok(archived)
    }

    fn restore_invoices(&mut self, invoices: &[Invoice]) {
        if let Err(rollback) = self.repository.save_invoices(invoices) {
            error!(error = %rollback, "Failed to restore invoices after a failed write");
        }
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    /// Finds a quote by id.
    pub fn find_quote(&self, id: QuoteId) -> StoreResult<Quote> {
        self.repository
            .load_quotes()?
            .into_iter()
            .find(|quote| quote.id == id)
            .ok_or_else(|| DocumentError::not_found(RecordKind::Quote, id).into())
    }

    /// Finds a quote by its number.
    pub fn find_quote_by_number(&self, number: &str) -> StoreResult<Quote> {
        self.repository
            .load_quotes()?
            .into_iter()
            .find(|quote| quote.quote_number == number)
            .ok_or_else(|| DocumentError::not_found(RecordKind::Quote, number).into())
    }

    /// Finds an invoice by id.
    pub fn find_invoice(&self, id: InvoiceId) -> StoreResult<Invoice> {
        self.repository
            .load_invoices()?
            .into_iter()
            .find(|invoice| invoice.id == id)
            .ok_or_else(|| DocumentError::not_found(RecordKind::Invoice, id).into())
    }

    /// Finds an invoice by its number.
    pub fn find_invoice_by_number(&self, number: &str) -> StoreResult<Invoice> {
        self.repository
            .load_invoices()?
            .into_iter()
            .find(|invoice| invoice.invoice_number == number)
            .ok_or_else(|| DocumentError::not_found(RecordKind::Invoice, number).into())
    }

    /// Quotes for display, newest first, with totals and expiry indicators.
    pub fn quote_listing(&self, include_archived: bool) -> StoreResult<Vec<QuoteRow>> {
        let today = self.today();
        let quotes = self.repository.load_quotes()?;
        Ok(ReportService::quote_listing(&quotes, include_archived)
            .into_iter()
            .map(|quote| QuoteRow {
                totals: quote.totals(),
                expiry: ReportService::quote_expiry(
                    &quote,
                    today,
                    self.documents.expiry_warning_days,
                ),
                quote,
            })
            .collect())
    }

    /// Invoices for display, newest first.
    pub fn invoice_listing(&self) -> StoreResult<Vec<Invoice>> {
        Ok(ReportService::invoice_listing(
            &self.repository.load_invoices()?,
        ))
    }

    // ------------------------------------------------------------------
    // Clients, products and company settings
    // ------------------------------------------------------------------

    /// Saves a client draft, appending or replacing by id.
    pub fn save_client(&mut self, draft: ClientDraft) -> StoreResult<Client> {
        let mut clients = self.repository.load_clients()?;
        let id = draft.id.unwrap_or_else(ClientId::new);
        let client = draft.into_client(id)?;

        match clients.iter().position(|existing| existing.id == id) {
            Some(index) => clients[index] = client.clone(),
            None => clients.push(client.clone()),
        }
        self.repository.save_clients(&clients)?;

        info!(client_id = %client.id, name = %client.name, "Client saved");
        Ok(client)
    }

    /// Deletes a client. Documents addressed to it keep a dangling reference.
    pub fn delete_client(&mut self, id: ClientId) -> StoreResult<Client> {
        let mut clients = self.repository.load_clients()?;
        let position = clients
            .iter()
            .position(|client| client.id == id)
            .ok_or_else(|| DocumentError::not_found(RecordKind::Client, id))?;
        let invoices = self.repository.load_invoices()?;
        let quotes = self.repository.load_quotes()?;

        let removed = clients.remove(position);
        self.repository.save_clients(&clients)?;

        let referencing = invoices.iter().filter(|i| i.client_id == id).count()
            + quotes.iter().filter(|q| q.client_id == id).count();
        if referencing > 0 {
            warn!(
                client_id = %id,
                documents = referencing,
                "Deleted client is still referenced by documents"
            );
        }

        info!(client_id = %id, name = %removed.name, "Client deleted");
        Ok(removed)
    }

    /// Finds a client by id.
    pub fn find_client(&self, id: ClientId) -> StoreResult<Client> {
        self.repository
            .load_clients()?
            .into_iter()
            .find(|client| client.id == id)
            .ok_or_else(|| DocumentError::not_found(RecordKind::Client, id).into())
    }

    /// Finds a client by exact id or case-insensitive name.
    pub fn find_client_by_name_or_id(&self, needle: &str) -> StoreResult<Client> {
        let wanted = needle.trim().to_lowercase();
        self.repository
            .load_clients()?
            .into_iter()
            .find(|client| client.id.to_string() == wanted || client.name.to_lowercase() == wanted)
            .ok_or_else(|| DocumentError::not_found(RecordKind::Client, needle).into())
    }

    /// All clients, in stored order.
    pub fn list_clients(&self) -> StoreResult<Vec<Client>> {
        self.repository.load_clients()
    }

    /// Merges an imported batch of clients, skipping known emails.
    pub fn import_clients(&mut self, incoming: Vec<ClientDraft>) -> StoreResult<ImportSummary> {
        let mut clients = self.repository.load_clients()?;
        let summary = merge_imported_clients(&clients, incoming);
        if !summary.imported.is_empty() {
            clients.extend(summary.imported.iter().cloned());
            self.repository.save_clients(&clients)?;
        }

        info!(
            imported = summary.imported.len(),
            duplicates = summary.duplicates,
            invalid = summary.invalid,
            "Clients imported"
        );
        Ok(summary)
    }

    /// Saves a product draft, appending or replacing by id.
    pub fn save_product(&mut self, draft: ProductDraft) -> StoreResult<Product> {
        let mut products = self.repository.load_products()?;
        let id = draft.id.unwrap_or_else(ProductId::new);
        let product = draft.into_product(id)?;

        match products.iter().position(|existing| existing.id == id) {
            Some(index) => products[index] = product.clone(),
            None => products.push(product.clone()),
        }
        self.repository.save_products(&products)?;

        info!(product_id = %product.id, name = %product.name, "Product saved");
        Ok(product)
    }

    /// Deletes a product. Line items filled from it are unaffected.
    pub fn delete_product(&mut self, id: ProductId) -> StoreResult<Product> {
        let mut products = self.repository.load_products()?;
        let position = products
            .iter()
            .position(|product| product.id == id)
            .ok_or_else(|| DocumentError::not_found(RecordKind::Product, id))?;
        let removed = products.remove(position);
        self.repository.save_products(&products)?;

        info!(product_id = %id, name = %removed.name, "Product deleted");
        Ok(removed)
    }

    /// Finds a product by id.
    pub fn find_product(&self, id: ProductId) -> StoreResult<Product> {
        self.repository
            .load_products()?
            .into_iter()
            .find(|product| product.id == id)
            .ok_or_else(|| DocumentError::not_found(RecordKind::Product, id).into())
    }

    /// All products, in stored order.
    pub fn list_products(&self) -> StoreResult<Vec<Product>> {
        self.repository.load_products()
    }

    /// Company settings.
    pub fn company_info(&self) -> StoreResult<CompanyInfo> {
        self.repository.load_company_info()
    }

    /// Replaces the company settings.
    pub fn save_company_info(&mut self, info: &CompanyInfo) -> StoreResult<()> {
        self.repository.save_company_info(info)?;
        info!(name = %info.name, "Company info saved");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Summaries
    // ------------------------------------------------------------------

    /// Dashboard figures.
    pub fn dashboard(&self) -> StoreResult<DashboardSummary> {
        let clients = self.repository.load_clients()?;
        let quotes = self.repository.load_quotes()?;
        let invoices = self.repository.load_invoices()?;
        Ok(ReportService::generate_dashboard(&clients, &quotes, &invoices))
    }

    /// Account view of one client.
    pub fn client_summary(&self, client_id: ClientId) -> StoreResult<ClientAccountSummary> {
        self.find_client(client_id)?;
        let quotes = self.repository.load_quotes()?;
        let invoices = self.repository.load_invoices()?;
        let payments = self.repository.load_payments()?;
        Ok(ReportService::generate_client_summary(
            client_id, &quotes, &invoices, &payments,
        ))
    }
}

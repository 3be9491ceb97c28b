//! Command handlers.

use factura_core::document::{DocumentKind, DocumentRef, LineItems};
use factura_core::payment::NewPayment;
use factura_core::totals::DocumentTotals;
use factura_store::{Clock, DocumentManager, KeyValueStore, StoreError};

use crate::Command;

/// Runs one command against the manager.
pub fn run<S, C>(manager: &mut DocumentManager<S, C>, command: Command) -> anyhow::Result<()>
where
    S: KeyValueStore,
    C: Clock,
{
    match command {
        Command::NextNumber { kind } => {
            let number = match DocumentKind::from(kind) {
                DocumentKind::Quote => manager.next_quote_number()?,
                DocumentKind::Invoice => manager.next_invoice_number()?,
            };
            println!("{number}");
        }
        Command::Quotes { archived } => {
            for row in manager.quote_listing(archived)? {
                let expiry = row.expiry.map_or("", |e| e.label());
                println!(
                    "{:<14} {} {:<10} {:>14} {}",
                    row.quote.quote_number,
                    row.quote.issue_date,
                    row.quote.status.label(),
                    row.totals.grand_total,
                    expiry
                );
            }
        }
        Command::Invoices => {
            let today = manager.today();
            for invoice in manager.invoice_listing()? {
                let late = if invoice.is_past_due(today) { "échue" } else { "" };
                println!(
                    "{:<14} {} {:<18} {:>14} {}",
                    invoice.invoice_number,
                    invoice.due_date,
                    invoice.status.label(),
                    invoice.totals().grand_total,
                    late
                );
            }
        }
        Command::Totals { number } => {
            let totals = match manager.find_quote_by_number(&number) {
                Ok(quote) => quote.totals(),
                Err(StoreError::Document(_)) => manager.find_invoice_by_number(&number)?.totals(),
                Err(err) => return Err(err.into()),
            };
            print_totals(&number, &totals);
        }
        Command::Pay {
            invoice,
            amount,
            method,
            date,
        } => {
            let invoice = manager.find_invoice_by_number(&invoice)?;
            let date = date.unwrap_or_else(|| manager.today());
            let outcome =
                manager.record_payment(invoice.id, NewPayment::new(date, amount, method))?;
            println!(
                "{} {}: paid {} / {}, balance {}",
                invoice.invoice_number,
                outcome.invoice.status.label(),
                outcome.reconciliation.total_paid,
                outcome.reconciliation.grand_total,
                outcome.reconciliation.balance_due
            );
        }
        Command::Convert { quote } => {
            let quote = manager.find_quote_by_number(&quote)?;
            let invoice = manager.convert_quote_to_invoice(quote.id)?;
            println!(
                "{} -> {} (due {})",
                quote.quote_number, invoice.invoice_number, invoice.due_date
            );
        }
        Command::Archive { quote } => {
            let quote = manager.find_quote_by_number(&quote)?;
            let archived = manager.archive_quote(quote.id)?;
            println!("{} {}", archived.quote_number, archived.status.label());
        }
        Command::DeleteInvoice { invoice } => {
            let invoice = manager.find_invoice_by_number(&invoice)?;
            manager.delete_document(DocumentRef::Invoice(invoice.id))?;
            println!("{} deleted", invoice.invoice_number);
        }
        Command::Dashboard => {
            let summary = manager.dashboard()?;
            println!("Clients : {}", summary.total_clients);
            println!("Devis en attente : {}", summary.pending_quotes);
            println!("Factures impayées : {}", summary.unpaid_invoices);
            println!("Chiffre d'affaires : {}", summary.revenue);
            println!("Devis récents");
            for quote in &summary.recent_quotes {
                println!(
                    "  {:<14} {:<10} {:>14}",
                    quote.quote_number,
                    quote.status.label(),
                    quote.totals().grand_total
                );
            }
            println!("Factures récentes");
            for invoice in &summary.recent_invoices {
                println!(
                    "  {:<14} {:<18} {:>14}",
                    invoice.invoice_number,
                    invoice.status.label(),
                    invoice.totals().grand_total
                );
            }
        }
        Command::Client { client } => {
            let client = manager.find_client_by_name_or_id(&client)?;
            let summary = manager.client_summary(client.id)?;
            println!("{} <{}>", client.name, client.email);
            println!("  Facturé : {}", summary.total_billed);
            println!("  Payé    : {}", summary.total_paid);
            println!("  Reste   : {}", summary.outstanding);
            for invoice in &summary.invoices {
                println!(
                    "  {:<14} {:<18} {:>14}",
                    invoice.invoice_number,
                    invoice.status.label(),
                    invoice.totals().grand_total
                );
            }
        }
    }
    Ok(())
}

fn print_totals(number: &str, totals: &DocumentTotals) {
    println!("{number}");
    println!("  Sous-total HT : {}", totals.subtotal);
    println!("  TVA           : {}", totals.tax_total);
    println!("  Total TTC     : {}", totals.grand_total);
}

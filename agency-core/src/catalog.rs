//! The fixed set of dashboard pages and the sidebar sections they live in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::table::SourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    StudyAbroad,
    Visa,
    Loans,
    Travel,
    Marketplace,
    Support,
    Clients,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::StudyAbroad,
        Section::Visa,
        Section::Loans,
        Section::Travel,
        Section::Marketplace,
        Section::Support,
        Section::Clients,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::StudyAbroad => "Study abroad",
            Section::Visa => "Visa",
            Section::Loans => "Loans",
            Section::Travel => "Travel",
            Section::Marketplace => "Marketplace",
            Section::Support => "Support",
            Section::Clients => "Clients",
        }
    }

    pub fn pages(&self) -> impl Iterator<Item = PageId> + '_ {
        PageId::ALL.into_iter().filter(move |page| page.section() == *self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageId {
    Applications,
    VisaCases,
    LoanPlans,
    Hotels,
    StockItems,
    Tickets,
    Faqs,
    Clients,
    Leads,
    MarketplaceProducts,
}

impl PageId {
    pub const ALL: [PageId; 10] = [
        PageId::Applications,
        PageId::VisaCases,
        PageId::LoanPlans,
        PageId::Hotels,
        PageId::StockItems,
        PageId::Tickets,
        PageId::Faqs,
        PageId::Clients,
        PageId::Leads,
        PageId::MarketplaceProducts,
    ];

    /// Command-line and URL name of the page.
    pub fn slug(&self) -> &'static str {
        match self {
            PageId::Applications => "applications",
            PageId::VisaCases => "visa-cases",
            PageId::LoanPlans => "loan-plans",
            PageId::Hotels => "hotels",
            PageId::StockItems => "stock-items",
            PageId::Tickets => "tickets",
            PageId::Faqs => "faqs",
            PageId::Clients => "clients",
            PageId::Leads => "leads",
            PageId::MarketplaceProducts => "marketplace-products",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PageId::Applications => "Applications",
            PageId::VisaCases => "Visa cases",
            PageId::LoanPlans => "Loan plans",
            PageId::Hotels => "Hotels",
            PageId::StockItems => "Stock items",
            PageId::Tickets => "Tickets",
            PageId::Faqs => "FAQs",
            PageId::Clients => "Clients",
            PageId::Leads => "Leads",
            PageId::MarketplaceProducts => "Marketplace products",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            PageId::Applications => Section::StudyAbroad,
            PageId::VisaCases => Section::Visa,
            PageId::LoanPlans => Section::Loans,
            PageId::Hotels => Section::Travel,
            PageId::StockItems | PageId::MarketplaceProducts => Section::Marketplace,
            PageId::Tickets | PageId::Faqs => Section::Support,
            PageId::Clients | PageId::Leads => Section::Clients,
        }
    }

    /// Every page states where its data comes from; nothing is inferred.
    pub fn source_kind(&self) -> SourceKind {
        match self {
            PageId::Clients | PageId::Leads | PageId::MarketplaceProducts => SourceKind::Remote,
            _ => SourceKind::Static,
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for PageId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        PageId::ALL
            .into_iter()
            .find(|page| page.slug() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = PageId::ALL.iter().map(|p| p.slug()).collect();
                format!("unknown page '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip_through_from_str() {
        for page in PageId::ALL {
            assert_eq!(page.slug().parse::<PageId>(), Ok(page));
        }
        assert_eq!("Visa_Cases".parse::<PageId>(), Ok(PageId::VisaCases));
        assert!("payroll".parse::<PageId>().is_err());
    }

    #[test]
    fn every_page_belongs_to_exactly_one_section() {
        let total: usize = Section::ALL.iter().map(|s| s.pages().count()).sum();
        assert_eq!(total, PageId::ALL.len());
    }

    #[test]
    fn only_api_backed_pages_are_remote() {
        let remote: Vec<PageId> = PageId::ALL
            .into_iter()
            .filter(|p| p.source_kind() == SourceKind::Remote)
            .collect();
        assert_eq!(remote, vec![PageId::Clients, PageId::Leads, PageId::MarketplaceProducts]);
    }
}

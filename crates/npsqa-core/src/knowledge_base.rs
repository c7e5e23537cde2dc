//! The NPS corpus the assistant answers from, plus a loader for extra `.txt` material.
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::types::KnowledgeDocument;

pub const BUILTIN_SOURCE: &str = "nps_knowledge_base";

const NPS_DOCUMENTS: &[&str] = &[
    "National Pension System (NPS) is a voluntary, defined contribution retirement savings scheme designed to enable systematic savings. \
It was launched in January 2004 for government employees and opened to all Indian citizens in 2009. \
NPS is regulated by the Pension Fund Regulatory and Development Authority (PFRDA).",
    "NPS Eligibility: Any Indian citizen between 18-70 years can open an NPS account. \
NRIs are also eligible to open and contribute to NPS accounts. \
There is no upper limit on income for NPS enrollment.",
    "NPS has two types of accounts:\n\
Tier I Account: This is the mandatory pension account with tax benefits but restricted withdrawals until retirement.\n\
Tier II Account: This is a voluntary savings account with flexible withdrawals but no tax benefits (except for government employees under certain conditions).",
    "NPS Tax Benefits under Section 80C: Contributions to NPS Tier I account are eligible for deduction up to ₹1.5 lakh under Section 80C of the Income Tax Act. \
This deduction is part of the overall ₹1.5 lakh limit under Section 80C which includes other investments like PPF, ELSS, life insurance premiums, etc.",
    "NPS Additional Tax Benefit under Section 80CCD(1B): An additional deduction of up to ₹50,000 is available exclusively for NPS contributions under Section 80CCD(1B). \
This is over and above the ₹1.5 lakh limit under Section 80C. \
This makes NPS one of the most tax-efficient retirement savings options.",
    "Employer Contribution Tax Benefits under Section 80CCD(2): Employer contributions to NPS are deductible up to 10% of salary (Basic + DA) for private sector employees and up to 14% for central government employees. \
This deduction is over and above the Section 80C and 80CCD(1B) limits.",
    "NPS Minimum Contribution Requirements:\n\
For Tier I: Minimum ₹500 per contribution, minimum ₹1,000 per year to keep account active.\n\
For Tier II: Minimum ₹250 per contribution, minimum ₹2,000 for account opening.\n\
There is no maximum limit on contributions.",
    "NPS Investment Options: Subscribers can choose from two investment approaches:\n\
1. Active Choice: You decide the allocation between Equity (E), Corporate Bonds (C), and Government Securities (G).\n\
2. Auto Choice (Life Cycle Fund): Asset allocation automatically adjusts based on your age, becoming more conservative as you approach retirement.",
    "NPS Fund Managers: PFRDA has empaneled several professional fund managers including SBI Pension Funds, LIC Pension Fund, \
UTI Retirement Solutions, ICICI Prudential Pension Funds Management Company, Kotak Mahindra Pension Fund, HDFC Pension Management Company \
and Aditya Birla Sun Life Pension Management. Subscribers can choose their preferred fund manager and can change once a year.",
    "NPS Withdrawal Rules at Age 60 (Normal Exit):\n\
- You can withdraw up to 60% of the accumulated corpus as a lump sum, which is tax-free.\n\
- The remaining 40% must be used to purchase an annuity (pension plan) from a PFRDA-empaneled insurance company.\n\
- The annuity provides regular monthly pension income.",
    "NPS Premature Withdrawal (Exit before 60):\n\
- Allowed only after completing 5 years in NPS.\n\
- You can withdraw only 20% as lump sum.\n\
- The remaining 80% must be used to purchase an annuity.\n\
- The lump sum withdrawal is taxable as per your income tax slab.",
    "NPS Partial Withdrawal Rules:\n\
- Allowed after 3 years of account opening.\n\
- Maximum 25% of own contributions (not employer contributions) can be withdrawn.\n\
- Allowed maximum 3 times during the entire tenure.\n\
- Permitted for specific purposes: children's higher education, children's marriage, purchase/construction of residential house, treatment of critical illnesses.\n\
- Partial withdrawals are tax-free.",
    "How to Open NPS Account Online (eNPS):\n\
1. Visit the eNPS portal at enps.nsdl.com\n\
2. Click on 'Registration' and select 'Individual Subscriber'\n\
3. Choose registration type (Aadhaar-based or non-Aadhaar)\n\
4. Fill in personal details, contact information, and nominee details\n\
5. Complete KYC verification using Aadhaar OTP or upload documents\n\
6. Choose investment preferences (fund manager, investment choice, scheme preference)\n\
7. Make initial contribution (minimum ₹500)\n\
8. Submit application and receive PRAN (Permanent Retirement Account Number)\n\
The entire process takes about 15-20 minutes.",
    "Documents Required for NPS Account Opening: PAN Card (mandatory), Aadhaar Card (for Aadhaar-based eKYC), \
bank account details (cancelled cheque or bank statement), passport-size photograph, address proof and date of birth proof (if not using Aadhaar). \
For NRIs: valid passport, overseas address proof, and PIO/OCI card if applicable.",
    "PRAN (Permanent Retirement Account Number): PRAN is a unique 12-digit number allotted to each NPS subscriber. \
It remains the same throughout the subscriber's lifetime, even if they change jobs or locations. \
You can access your NPS account online using PRAN and password through the CRA (Central Recordkeeping Agency) system.",
    "Ways to Contribute to NPS:\n\
1. Online: Through eNPS portal, netbanking, UPI, debit card\n\
2. Points of Presence (PoP): Banks and other authorized entities\n\
3. D-Remit: For government employees through their DDO\n\
4. Standing Instructions: Set up auto-debit from bank account\n\
Contributions can be made monthly, quarterly, or annually as per convenience.",
    "NPS Annuity Options at Retirement: When you purchase annuity with 40% (or 80% in case of premature exit) of corpus, you can choose from: \
annuity for life with return of purchase price on death; annuity for life with 100% or 50% of annuity payable to spouse on death; \
annuity for life increasing at a simple rate of 3% per annum; annuity for life with 5 or 10 year certain period. \
The annuity amount received is taxable as per your income tax slab.",
    "NPS vs Other Retirement Options:\n\
Compared to EPF: NPS offers higher equity exposure (up to 75%), better tax benefits (additional ₹50,000 under 80CCD(1B)), but EPF offers guaranteed returns.\n\
Compared to PPF: NPS has better tax benefits, higher potential returns through equity, but PPF offers guaranteed returns and complete tax-free withdrawal.\n\
Compared to Mutual Funds: NPS has lower expense ratios (capped at 0.09%), additional tax benefits, but less liquidity.",
    "Corporate NPS (All Citizens Model): Employers can offer NPS as a retirement benefit to employees. \
Employer contributions are tax-deductible for the company, and contributions up to 10% of salary are tax-free for employees (14% for government employees). \
Many companies now offer NPS as part of their compensation structure.",
    "NPS for Non-Resident Indians (NRIs): NRIs can open and maintain NPS accounts. \
Contributions can be made in Indian Rupees from NRE/NRO accounts. They cannot contribute once they become foreign nationals. \
Withdrawals follow the same rules as resident Indians, and repatriation of funds is subject to FEMA regulations.",
];

#[derive(Default)]
pub struct KnowledgeBase;

impl KnowledgeBase {
    pub fn new() -> Self { Self }

    /// The built-in NPS corpus, ids `nps_doc_{i}`.
    pub fn builtin(&self) -> Vec<KnowledgeDocument> {
        NPS_DOCUMENTS
            .iter()
            .enumerate()
            .map(|(i, text)| KnowledgeDocument {
                id: format!("nps_doc_{i}"),
                content: (*text).to_string(),
                source: BUILTIN_SOURCE.to_string(),
                doc_index: i,
            })
            .collect()
    }

    /// Every `.txt` file under `dir`, one document per paragraph.
    pub fn load_directory(&self, dir: &Path) -> Result<Vec<KnowledgeDocument>> {
        let files = self.list_txt_files(dir);
        if files.is_empty() {
            warn!(dir = %dir.display(), "no .txt files found");
            return Ok(vec![]);
        }
        let mut docs = Vec::new();
        for file_path in &files {
            let content = self.read_file_content(file_path)?;
            let stem = file_path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
            let source = file_path.strip_prefix(dir).unwrap_or(file_path).to_string_lossy().to_string();
            let before = docs.len();
            docs.extend(self.split_paragraphs(&content).into_iter().enumerate().map(|(i, paragraph)| KnowledgeDocument {
                id: format!("{stem}:{i}"),
                content: paragraph,
                source: source.clone(),
                doc_index: i,
            }));
            debug!(file = %file_path.display(), paragraphs = docs.len() - before, "loaded file");
        }
        info!(files = files.len(), documents = docs.len(), "loaded knowledge base directory");
        Ok(docs)
    }

    fn read_file_content(&self, file_path: &Path) -> Result<String> {
        match fs::read_to_string(file_path) {
            Ok(content) => Ok(content),
            Err(_) => {
                let bytes = fs::read(file_path).with_context(|| format!("reading {}", file_path.display()))?;
                Ok(String::from_utf8_lossy(&bytes).to_string())
            }
        }
    }

    fn split_paragraphs(&self, content: &str) -> Vec<String> {
        content
            .replace("\r\n", "\n")
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn list_txt_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut txt_files: Vec<PathBuf> = walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().to_path_buf())
            .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("txt"))
            .collect();
        txt_files.sort();
        txt_files
    }
}

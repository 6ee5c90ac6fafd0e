//! A single row of a prokka-style strain annotation table.

use crate::config::AnnotationType;

pub const UNANNOTATED_GENE: &str = "unannotated_gene";
pub const UNANNOTATED_EC: &str = "unannotated_ec";
pub const UNANNOTATED_COG: &str = "unannotated_cog";
pub const UNANNOTATED_PRODUCT: &str = "unannotated_gene_product";

/// Number of tab-separated columns in an annotation row.
pub const ANNOTATION_FIELDS: usize = 7;

/// One annotated feature.
///
/// Empty gene, EC, COG and product fields are replaced with placeholder
/// labels, and multi-copy gene names such as `ssuE_2` are collapsed to
/// their base name (`ssuE`) so copies share one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    locus_tag: String,
    feature_type: String,
    length_bp: String,
    gene_symbol: String,
    ec_number: String,
    functional_category: String,
    product_description: String,
}

impl AnnotationRecord {
    pub fn new(
        locus_tag: &str,
        feature_type: &str,
        length_bp: &str,
        gene_symbol: &str,
        ec_number: &str,
        functional_category: &str,
        product_description: &str,
    ) -> Self {
        AnnotationRecord {
            locus_tag: locus_tag.to_string(),
            feature_type: feature_type.to_string(),
            length_bp: length_bp.to_string(),
            gene_symbol: normalize_gene_symbol(gene_symbol),
            ec_number: or_placeholder(ec_number, UNANNOTATED_EC),
            functional_category: or_placeholder(functional_category, UNANNOTATED_COG),
            product_description: or_placeholder(product_description, UNANNOTATED_PRODUCT),
        }
    }

    /// Builds a record from the columns of one row.
    ///
    /// Returns `None` when fewer than seven columns are present; columns past
    /// the seventh are ignored.
    pub fn from_fields(fields: &[&str]) -> Option<Self> {
        if fields.len() < ANNOTATION_FIELDS {
            return None;
        }
        Some(Self::new(
            fields[0], fields[1], fields[2], fields[3], fields[4], fields[5], fields[6],
        ))
    }

    /// The identifier this record contributes for the given annotation type.
    pub fn identifier(&self, annotation_type: AnnotationType) -> &str {
        match annotation_type {
            AnnotationType::Gene => &self.gene_symbol,
            AnnotationType::Ko => &self.ec_number,
            AnnotationType::Cog => &self.functional_category,
        }
    }

    pub fn locus_tag(&self) -> &str {
        &self.locus_tag
    }

    pub fn feature_type(&self) -> &str {
        &self.feature_type
    }

    pub fn length_bp(&self) -> &str {
        &self.length_bp
    }

    pub fn gene_symbol(&self) -> &str {
        &self.gene_symbol
    }

    pub fn ec_number(&self) -> &str {
        &self.ec_number
    }

    pub fn functional_category(&self) -> &str {
        &self.functional_category
    }

    pub fn product_description(&self) -> &str {
        &self.product_description
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

// `<base>_<copy>` -> `<base>`; names with more or fewer underscores are kept.
fn normalize_gene_symbol(gene: &str) -> String {
    if gene.is_empty() {
        return UNANNOTATED_GENE.to_string();
    }
    let mut parts = gene.split('_');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(base), Some(_), None) => base.to_string(),
        _ => gene.to_string(),
    }
}

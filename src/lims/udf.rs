// Sample attribute (UDF) names as configured in the lab's LIMS.

pub const CUSTOMER: &str = "customer";
pub const FAMILY_ID: &str = "familyID";
pub const SEX: &str = "Gender";
pub const STATUS: &str = "Status";
pub const APPLICATION_TAG: &str = "Sequencing Analysis";
pub const CLINICAL_ID: &str = "Clinical Genomics ID";
pub const MOTHER: &str = "motherID";
pub const FATHER: &str = "fatherID";
pub const OTHER_RELATIONS: &str = "Other relations";
pub const GENE_LIST: &str = "Gene List";
pub const ADDITIONAL_GENE_LIST: &str = "Additional Gene List";
pub const CAPTURE_KIT: &str = "Capture Library version";
pub const CANCELLED: &str = "cancelled";
pub const TUMOR: &str = "tumor";
pub const EXCLUDE_ANALYSIS: &str = "exclude analysis";
pub const TISSUE_TYPE: &str = "tissue_type";
pub const READS_MISSING: &str = "Reads missing (M)";

pub const YES: &str = "yes";
pub const NOT_AVAILABLE: &str = "NA";

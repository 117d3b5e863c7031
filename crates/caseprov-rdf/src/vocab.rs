//! IRIs of the vocabularies the renderer consults.
//!
//! Only terms actually read or written by this workspace are listed.

pub mod rdf {
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

pub mod rdfs {
    pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
}

pub mod owl {
    pub const NS: &str = "http://www.w3.org/2002/07/owl#";
}

pub mod xsd {
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    pub const DATE_TIME_STAMP: &str = "http://www.w3.org/2001/XMLSchema#dateTimeStamp";
}

pub mod prov {
    pub const NS: &str = "http://www.w3.org/ns/prov#";

    // Classes.
    pub const ACTIVITY: &str = "http://www.w3.org/ns/prov#Activity";
    pub const AGENT: &str = "http://www.w3.org/ns/prov#Agent";
    pub const ENTITY: &str = "http://www.w3.org/ns/prov#Entity";
    pub const COLLECTION: &str = "http://www.w3.org/ns/prov#Collection";
    pub const EMPTY_COLLECTION: &str = "http://www.w3.org/ns/prov#EmptyCollection";
    pub const PERSON: &str = "http://www.w3.org/ns/prov#Person";
    pub const ORGANIZATION: &str = "http://www.w3.org/ns/prov#Organization";
    pub const SOFTWARE_AGENT: &str = "http://www.w3.org/ns/prov#SoftwareAgent";
    pub const ASSOCIATION: &str = "http://www.w3.org/ns/prov#Association";
    pub const ATTRIBUTION: &str = "http://www.w3.org/ns/prov#Attribution";
    pub const COMMUNICATION: &str = "http://www.w3.org/ns/prov#Communication";
    pub const DELEGATION: &str = "http://www.w3.org/ns/prov#Delegation";
    pub const DERIVATION: &str = "http://www.w3.org/ns/prov#Derivation";
    pub const GENERATION: &str = "http://www.w3.org/ns/prov#Generation";
    pub const USAGE: &str = "http://www.w3.org/ns/prov#Usage";

    // Starting-point and expanded properties.
    pub const ACTED_ON_BEHALF_OF: &str = "http://www.w3.org/ns/prov#actedOnBehalfOf";
    pub const ENDED_AT_TIME: &str = "http://www.w3.org/ns/prov#endedAtTime";
    pub const GENERATED: &str = "http://www.w3.org/ns/prov#generated";
    pub const HAD_MEMBER: &str = "http://www.w3.org/ns/prov#hadMember";
    pub const STARTED_AT_TIME: &str = "http://www.w3.org/ns/prov#startedAtTime";
    pub const USED: &str = "http://www.w3.org/ns/prov#used";
    pub const WAS_ASSOCIATED_WITH: &str = "http://www.w3.org/ns/prov#wasAssociatedWith";
    pub const WAS_ATTRIBUTED_TO: &str = "http://www.w3.org/ns/prov#wasAttributedTo";
    pub const WAS_DERIVED_FROM: &str = "http://www.w3.org/ns/prov#wasDerivedFrom";
    pub const WAS_GENERATED_BY: &str = "http://www.w3.org/ns/prov#wasGeneratedBy";
    pub const WAS_INFORMED_BY: &str = "http://www.w3.org/ns/prov#wasInformedBy";

    // Qualified terms.
    pub const ACTIVITY_PROP: &str = "http://www.w3.org/ns/prov#activity";
    pub const AGENT_PROP: &str = "http://www.w3.org/ns/prov#agent";
    pub const AT_TIME: &str = "http://www.w3.org/ns/prov#atTime";
    pub const ENTITY_PROP: &str = "http://www.w3.org/ns/prov#entity";
    pub const QUALIFIED_ASSOCIATION: &str = "http://www.w3.org/ns/prov#qualifiedAssociation";
    pub const QUALIFIED_ATTRIBUTION: &str = "http://www.w3.org/ns/prov#qualifiedAttribution";
    pub const QUALIFIED_COMMUNICATION: &str = "http://www.w3.org/ns/prov#qualifiedCommunication";
    pub const QUALIFIED_DELEGATION: &str = "http://www.w3.org/ns/prov#qualifiedDelegation";
    pub const QUALIFIED_DERIVATION: &str = "http://www.w3.org/ns/prov#qualifiedDerivation";
    pub const QUALIFIED_END: &str = "http://www.w3.org/ns/prov#qualifiedEnd";
    pub const QUALIFIED_GENERATION: &str = "http://www.w3.org/ns/prov#qualifiedGeneration";
    pub const QUALIFIED_INVALIDATION: &str = "http://www.w3.org/ns/prov#qualifiedInvalidation";
    pub const QUALIFIED_START: &str = "http://www.w3.org/ns/prov#qualifiedStart";
    pub const QUALIFIED_USAGE: &str = "http://www.w3.org/ns/prov#qualifiedUsage";
}

pub mod time {
    pub const NS: &str = "http://www.w3.org/2006/time#";

    pub const AFTER: &str = "http://www.w3.org/2006/time#after";
    pub const BEFORE: &str = "http://www.w3.org/2006/time#before";
    pub const INTERVAL_AFTER: &str = "http://www.w3.org/2006/time#intervalAfter";
    pub const INTERVAL_BEFORE: &str = "http://www.w3.org/2006/time#intervalBefore";
    pub const INTERVAL_CONTAINS: &str = "http://www.w3.org/2006/time#intervalContains";
    pub const INTERVAL_DISJOINT: &str = "http://www.w3.org/2006/time#intervalDisjoint";
    pub const INTERVAL_DURING: &str = "http://www.w3.org/2006/time#intervalDuring";
    pub const INTERVAL_EQUALS: &str = "http://www.w3.org/2006/time#intervalEquals";
    pub const INTERVAL_FINISHED_BY: &str = "http://www.w3.org/2006/time#intervalFinishedBy";
    pub const INTERVAL_FINISHES: &str = "http://www.w3.org/2006/time#intervalFinishes";
    pub const INTERVAL_IN: &str = "http://www.w3.org/2006/time#intervalIn";
    pub const INTERVAL_MEETS: &str = "http://www.w3.org/2006/time#intervalMeets";
    pub const INTERVAL_MET_BY: &str = "http://www.w3.org/2006/time#intervalMetBy";
    pub const INTERVAL_OVERLAPPED_BY: &str = "http://www.w3.org/2006/time#intervalOverlappedBy";
    pub const INTERVAL_OVERLAPS: &str = "http://www.w3.org/2006/time#intervalOverlaps";
    pub const INTERVAL_STARTED_BY: &str = "http://www.w3.org/2006/time#intervalStartedBy";
    pub const INTERVAL_STARTS: &str = "http://www.w3.org/2006/time#intervalStarts";
}

pub mod case_investigation {
    pub const NS: &str = "https://ontology.caseontology.org/case/investigation/";
    pub const EXHIBIT_NUMBER: &str =
        "https://ontology.caseontology.org/case/investigation/exhibitNumber";
}

pub mod uco_core {
    pub const NS: &str = "https://ontology.unifiedcyberontology.org/uco/core/";
    pub const DESCRIPTION: &str = "https://ontology.unifiedcyberontology.org/uco/core/description";
    pub const NAME: &str = "https://ontology.unifiedcyberontology.org/uco/core/name";
}

pub mod uco_action {
    pub const NS: &str = "https://ontology.unifiedcyberontology.org/uco/action/";
    pub const START_TIME: &str = "https://ontology.unifiedcyberontology.org/uco/action/startTime";
    pub const END_TIME: &str = "https://ontology.unifiedcyberontology.org/uco/action/endTime";
}

/// Prefix bindings every graph and every query starts from.
pub const DEFAULT_PREFIXES: &[(&str, &str)] = &[
    ("case-investigation", case_investigation::NS),
    ("owl", owl::NS),
    ("prov", prov::NS),
    ("rdf", rdf::NS),
    ("rdfs", rdfs::NS),
    ("time", time::NS),
    ("uco-action", uco_action::NS),
    ("uco-core", uco_core::NS),
    ("xsd", xsd::NS),
];

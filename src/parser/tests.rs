//! Tests for parser module

use super::*;
use crate::decode::Node;
use crate::error::{Error, NO_RECORDS_FOUND};
use crate::types::{Row, SystemMetadata};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn row(pairs: &[(&str, Option<&str>)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.map(str::to_string)))
        .collect()
}

// ============================================================================
// Format Selector Tests
// ============================================================================

#[test_case("COMPACT", ResponseFormat::Compact ; "compact")]
#[test_case("STANDARD-XML", ResponseFormat::StandardXml ; "standard xml")]
fn test_select_known_formats(name: &str, expected: ResponseFormat) {
    assert_eq!(select(name).unwrap(), expected);
    assert_eq!(name.parse::<ResponseFormat>().unwrap(), expected);
    assert_eq!(expected.to_string(), name);
}

#[test_case("compact" ; "lowercase")]
#[test_case("COMPACT-DECODED" ; "decoded variant")]
#[test_case(" COMPACT" ; "leading space")]
#[test_case("" ; "empty")]
#[test_case("JSON" ; "unknown")]
fn test_select_rejects_unknown(name: &str) {
    let err = select(name).unwrap_err();
    assert!(
        matches!(err, Error::UnsupportedFormat { ref format } if format == name),
        "unexpected error: {err}"
    );
}

#[test]
fn test_format_capabilities() {
    for operation in [
        Operation::CapabilityUrls,
        Operation::Metadata,
        Operation::System,
        Operation::Search,
    ] {
        assert!(ResponseFormat::Compact.supports(operation));
    }
    assert!(ResponseFormat::StandardXml.supports(Operation::Search));
    assert!(!ResponseFormat::StandardXml.supports(Operation::CapabilityUrls));
    assert!(!ResponseFormat::StandardXml.supports(Operation::Metadata));
    assert!(!ResponseFormat::StandardXml.supports(Operation::System));
}

#[test]
fn test_format_default_and_serde() {
    assert_eq!(ResponseFormat::default(), ResponseFormat::Compact);

    let format: ResponseFormat = serde_yaml::from_str("STANDARD-XML").unwrap();
    assert_eq!(format, ResponseFormat::StandardXml);
    assert_eq!(
        serde_json::to_string(&ResponseFormat::Compact).unwrap(),
        "\"COMPACT\""
    );
    assert!(serde_yaml::from_str::<ResponseFormat>("XML").is_err());
}

// ============================================================================
// Capability URL Tests
// ============================================================================

#[test]
fn test_capability_urls() {
    let body = b"<RETS ReplyCode=\"0\" ReplyText=\"Success\"><RETS-RESPONSE>Login=/x\nSearch=/y\nGetMetadata=/z</RETS-RESPONSE></RETS>";
    let urls = CompactParser.parse_capability_urls(body).unwrap();

    assert_eq!(urls.len(), 3);
    assert_eq!(urls["Login"], "/x");
    assert_eq!(urls["Search"], "/y");
    assert_eq!(urls["GetMetadata"], "/z");
}

#[test]
fn test_capability_urls_login_reply() {
    let body = br"<RETS ReplyCode='0' ReplyText='Operation Successful'>
    <RETS-RESPONSE>
        MemberName = member_name
        User=user_id,user_level,user_class,agent_code

        Broker=RETSOFFIC
        MetadataVersion=01.09.02991
        Login=/rets2_1/Login
        Search=/rets2_1/Search?Format=COMPACT
        Login=/rets2_1/Login2
    </RETS-RESPONSE>
</RETS>";
    let urls = CompactParser.parse_capability_urls(body).unwrap();

    assert_eq!(urls["MemberName"], "member_name");
    assert_eq!(urls["User"], "user_id,user_level,user_class,agent_code");
    assert_eq!(urls["Search"], "/rets2_1/Search?Format=COMPACT");
    assert_eq!(urls["Login"], "/rets2_1/Login2");
    assert_eq!(urls.len(), 6);
}

#[test]
fn test_capability_urls_without_response_element() {
    let body = br#"<RETS ReplyCode="0" ReplyText="Success"/>"#;
    let urls = CompactParser.parse_capability_urls(body).unwrap();
    assert!(urls.is_empty());
}

#[test]
fn test_capability_urls_line_without_equals() {
    let body = b"<RETS ReplyCode=\"0\"><RETS-RESPONSE>Login=/x\nBroken line</RETS-RESPONSE></RETS>";
    let err = CompactParser.parse_capability_urls(body).unwrap_err();

    assert!(matches!(err, Error::Parse { .. }));
    assert!(err.to_string().contains("Broken line"));
}

#[test]
fn test_capability_urls_api_error() {
    let body = br#"<RETS ReplyCode="20036" ReplyText="Missing User-Agent"/>"#;
    let err = CompactParser.parse_capability_urls(body).unwrap_err();
    assert_eq!(err.reply_code(), Some(20036));
}

// ============================================================================
// Metadata Tests
// ============================================================================

#[test]
fn test_metadata_resource() {
    let body = "<RETS ReplyCode=\"0\" ReplyText=\"Success\">
    <METADATA-RESOURCE Date=\"2016-11-24T05:24:06Z\" Version=\"01.09.02991\">
        <COLUMNS>\tResourceID\tStandardName\t</COLUMNS>
        <DATA>\tActiveAgent\tActiveAgent\t</DATA>
        <DATA>\tOffice\tOffice\t</DATA>
        <DATA>\tProperty\tProperty\t</DATA>
    </METADATA-RESOURCE>
</RETS>";
    let metadata = CompactParser.parse_metadata(body.as_bytes()).unwrap();

    assert_eq!(metadata.len(), 1);
    let resource = &metadata[0];
    assert_eq!(resource.metadata_type, "RESOURCE");
    assert_eq!(resource.resource, None);
    assert_eq!(resource.class, None);
    assert_eq!(resource.version.as_deref(), Some("01.09.02991"));
    assert_eq!(resource.date.as_deref(), Some("2016-11-24T05:24:06Z"));
    assert_eq!(resource.rows.len(), 3);
    assert_eq!(
        resource.rows[2],
        row(&[("ResourceID", Some("Property")), ("StandardName", Some("Property"))])
    );
}

#[test]
fn test_metadata_multiple_containers() {
    let body = "<RETS ReplyCode=\"0\">
    <METADATA-TABLE Resource=\"Property\" Class=\"RES\">
        <COLUMNS>\tSystemName\tDataType\t</COLUMNS>
        <DATA>\tLIST_1\tCharacter\t</DATA>
    </METADATA-TABLE>
    <METADATA-TABLE Resource=\"Property\" Class=\"LND\">
        <COLUMNS>\tSystemName\tDataType\t</COLUMNS>
    </METADATA-TABLE>
    <METADATA-LOOKUP Resource=\"Property\"/>
    <DELIMITER value=\"09\"/>
</RETS>";
    let metadata = CompactParser.parse_metadata(body.as_bytes()).unwrap();

    let kinds: Vec<&str> = metadata.iter().map(|m| m.metadata_type.as_str()).collect();
    assert_eq!(kinds, vec!["TABLE", "TABLE", "LOOKUP"]);
    assert_eq!(metadata[0].class.as_deref(), Some("RES"));
    assert_eq!(metadata[0].resource.as_deref(), Some("Property"));
    assert_eq!(
        metadata[0].rows,
        vec![row(&[("SystemName", Some("LIST_1")), ("DataType", Some("Character"))])]
    );
    assert_eq!(metadata[1].class.as_deref(), Some("LND"));
    assert!(metadata[1].rows.is_empty());
    assert!(metadata[2].rows.is_empty());
}

#[test]
fn test_metadata_empty_reply() {
    let body = br#"<RETS ReplyCode="0" ReplyText="Success"></RETS>"#;
    assert!(CompactParser.parse_metadata(body).unwrap().is_empty());
}

// ============================================================================
// System Metadata Tests
// ============================================================================

const SYSTEM_REPLY: &str = r#"<RETS ReplyCode="0" ReplyText="Success">
    <METADATA-SYSTEM Date="2016-11-24T05:24:06Z" Version="01.09.02991">
        <SYSTEM SystemDescription="ARMLS" SystemID="az" TimeZoneOffset="-06:00"/>
        <COMMENTS/>
    </METADATA-SYSTEM>
</RETS>"#;

#[test]
fn test_system_metadata() {
    let system = CompactParser.parse_system(SYSTEM_REPLY.as_bytes()).unwrap();

    assert_eq!(
        system,
        SystemMetadata {
            system_id: "az".to_string(),
            system_description: "ARMLS".to_string(),
            system_date: "2016-11-24T05:24:06Z".to_string(),
            system_version: "01.09.02991".to_string(),
            time_zone_offset: Some("-06:00".to_string()),
            comments: None,
        }
    );
}

#[test]
fn test_system_metadata_comments() {
    let body = SYSTEM_REPLY.replace("<COMMENTS/>", "<COMMENTS> Nightly refresh at 2am </COMMENTS>");
    let system = CompactParser.parse_system(body.as_bytes()).unwrap();
    assert_eq!(system.comments.as_deref(), Some("Nightly refresh at 2am"));

    let body = SYSTEM_REPLY.replace("<COMMENTS/>", "");
    let system = CompactParser.parse_system(body.as_bytes()).unwrap();
    assert!(system.comments.is_none());
}

#[test]
fn test_system_metadata_without_time_zone() {
    let body = SYSTEM_REPLY.replace(r#" TimeZoneOffset="-06:00""#, "");
    let system = CompactParser.parse_system(body.as_bytes()).unwrap();
    assert!(system.time_zone_offset.is_none());
}

#[test]
fn test_system_metadata_missing_elements() {
    let body = br#"<RETS ReplyCode="0"><METADATA-SYSTEM Date="d" Version="v"/></RETS>"#;
    let err = CompactParser.parse_system(body).unwrap_err();
    assert!(err.to_string().contains("missing SYSTEM element"));

    let body = br#"<RETS ReplyCode="0"/>"#;
    let err = CompactParser.parse_system(body).unwrap_err();
    assert!(err.to_string().contains("missing METADATA-SYSTEM element"));
}

#[test]
fn test_system_metadata_missing_required_attribute() {
    let body = SYSTEM_REPLY.replace(r#" SystemID="az""#, "");
    let err = CompactParser.parse_system(body.as_bytes()).unwrap_err();

    assert!(matches!(err, Error::Parse { .. }));
    assert!(err.to_string().contains("SystemID"));
}

// ============================================================================
// COMPACT Search Tests
// ============================================================================

#[test]
fn test_compact_search() {
    let body = "<RETS ReplyCode=\"0\" ReplyText=\"Operation Successful\">
    <COUNT Records=\"120\"/>
    <DELIMITER value=\"09\"/>
    <COLUMNS>\tLIST_87\tLIST_105\tLIST_1\t</COLUMNS>
    <DATA>\t2016-12-01T00:08:10\t5489015\t20160824051756837742000000\t</DATA>
    <DATA>\t2016-12-01T00:10:02\t5497756\t20160915055426038684000000\t</DATA>
    <MAXROWS/>
</RETS>";
    let result = CompactParser.parse_search(body.as_bytes()).unwrap();

    assert_eq!(result.count, Some(120));
    assert!(result.max_rows);
    let rows: Vec<&Row> = result.rows().collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[1],
        &row(&[
            ("LIST_87", Some("2016-12-01T00:10:02")),
            ("LIST_105", Some("5497756")),
            ("LIST_1", Some("20160915055426038684000000")),
        ])
    );
}

#[test]
fn test_compact_search_count_only() {
    let body = br#"<RETS ReplyCode="0" ReplyText="Success"><COUNT Records="42"/></RETS>"#;
    let result = CompactParser.parse_search(body).unwrap();

    assert_eq!(result.count, Some(42));
    assert!(!result.max_rows);
    assert_eq!(result.data, None);
}

#[test]
fn test_compact_search_without_count() {
    let body = "<RETS ReplyCode=\"0\"><COLUMNS>\tA\t</COLUMNS><DATA>\t1\t</DATA></RETS>";
    let result = CompactParser.parse_search(body.as_bytes()).unwrap();

    assert_eq!(result.count, None);
    assert_eq!(result.len(), 1);
}

#[test_case(ResponseFormat::Compact ; "compact")]
#[test_case(ResponseFormat::StandardXml ; "standard xml")]
fn test_search_no_records_found(format: ResponseFormat) {
    let body = format!(r#"<RETS ReplyCode="{NO_RECORDS_FOUND}" ReplyText="No Records Found."/>"#);
    let result = format.parse_search(body.as_bytes()).unwrap();

    assert_eq!(result, SearchResult::empty());
}

#[test]
fn test_search_no_records_found_in_status_element() {
    let body = br#"<RETS ReplyCode="0" ReplyText="Success">
    <RETS-STATUS ReplyCode="20201" ReplyText="No matching records were found"/>
</RETS>"#;
    let result = CompactParser.parse_search(body).unwrap();
    assert_eq!(result, SearchResult::empty());
}

#[test_case(ResponseFormat::Compact ; "compact")]
#[test_case(ResponseFormat::StandardXml ; "standard xml")]
fn test_search_other_errors_propagate(format: ResponseFormat) {
    let body = br#"<RETS ReplyCode="20203" ReplyText="Miscellaneous Search Error"/>"#;
    let err = format.parse_search(body).unwrap_err();

    match err {
        Error::Api { code, text, .. } => {
            assert_eq!(code, 20203);
            assert_eq!(text, "Miscellaneous Search Error");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_search_invalid_count() {
    let body = br#"<RETS ReplyCode="0"><COUNT Records="many"/></RETS>"#;
    let err = CompactParser.parse_search(body).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));

    let body = br#"<RETS ReplyCode="0"><COUNT/></RETS>"#;
    let err = CompactParser.parse_search(body).unwrap_err();
    assert!(err.to_string().contains("no Records attribute"));
}

#[test]
fn test_search_invalid_delimiter_propagates() {
    let body = br#"<RETS ReplyCode="0"><DELIMITER value="x"/><COLUMNS>|A|</COLUMNS></RETS>"#;
    let err = CompactParser.parse_search(body).unwrap_err();
    assert!(matches!(err, Error::InvalidDelimiter { .. }));
}

const LATIN1_SEARCH: &[u8] = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>
<RETS ReplyCode=\"0\" ReplyText=\"Operation Successful\">
<COUNT Records=\"1\"/>
<DELIMITER value=\"09\"/>
<COLUMNS>\tLIST_1\tCITY\t</COLUMNS>
<DATA>\t5489015\tSanta F\xe9\t</DATA>
</RETS>";

#[test]
fn test_compact_search_declared_latin1() {
    let result = CompactParser.parse_search(LATIN1_SEARCH).unwrap();

    let rows: Vec<&Row> = result.rows().collect();
    assert_eq!(
        rows,
        vec![&row(&[("LIST_1", Some("5489015")), ("CITY", Some("Santa F\u{e9}"))])]
    );
}

#[test]
fn test_standard_search_requires_utf8() {
    let err = StandardXmlParser.parse_search(LATIN1_SEARCH).unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}

#[test]
fn test_search_malformed_body() {
    let err = CompactParser.parse_search(b"<RETS ReplyCode=\"0\">").unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}

// ============================================================================
// STANDARD-XML Tests
// ============================================================================

const STANDARD_SEARCH: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<RETS xmlns="http://rets.org/xsd/Syndication/2012-03" xmlns:commons="http://rets.org/xsd/RETSCommons" ReplyCode="0" ReplyText="Operation Successful">
    <COUNT Records="2"/>
    <RETS-RESPONSE>
        <PropertyDetails>
            <ListingID>5489015</ListingID>
            <commons:Address>
                <commons:City>Phoenix</commons:City>
            </commons:Address>
            <Photo id="1"/>
            <Photo id="2"/>
        </PropertyDetails>
        <PropertyDetails>
            <ListingID>5497756</ListingID>
        </PropertyDetails>
    </RETS-RESPONSE>
</RETS>"#;

#[test]
fn test_standard_search() {
    let result = StandardXmlParser
        .parse_search(STANDARD_SEARCH.as_bytes())
        .unwrap();

    assert_eq!(result.count, Some(2));
    assert!(!result.max_rows);
    let data = result.data.unwrap();
    assert_eq!(data.len(), 2);

    let first = data[0].as_node().unwrap();
    assert_eq!(first.get("ListingID"), Some(&Node::from("5489015")));
    assert_eq!(
        first.get("Address").and_then(|a| a.get("City")),
        Some(&Node::from("Phoenix"))
    );
    let photos = first.get("Photo").and_then(Node::as_list).unwrap();
    assert_eq!(photos[1].get("id"), Some(&Node::from("2")));

    let second = data[1].as_node().unwrap();
    assert_eq!(second.get("ListingID"), Some(&Node::from("5497756")));
}

#[test]
fn test_standard_search_without_response_element() {
    let body = br#"<RETS ReplyCode="0"><COUNT Records="5"/><MAXROWS/></RETS>"#;
    let result = StandardXmlParser.parse_search(body).unwrap();

    assert_eq!(result.count, Some(5));
    assert!(result.max_rows);
    assert!(result.data.is_none());
}

#[test]
fn test_standard_search_namespaced_status() {
    let body = br#"<r:RETS xmlns:r="urn:rets"><r:RETS-STATUS ReplyCode="20201" ReplyText="No Records"/></r:RETS>"#;
    let result = StandardXmlParser.parse_search(body).unwrap();
    assert_eq!(result, SearchResult::empty());
}

#[test]
fn test_standard_unsupported_operations() {
    let body = br#"<RETS ReplyCode="0"/>"#;

    let err = StandardXmlParser.parse_capability_urls(body).unwrap_err();
    assert!(matches!(
        err,
        Error::NotSupportedByFormat {
            operation: "parse_capability_urls",
            format: STANDARD_XML_FORMAT,
        }
    ));
    assert!(matches!(
        StandardXmlParser.parse_metadata(body).unwrap_err(),
        Error::NotSupportedByFormat { .. }
    ));
    assert!(matches!(
        ResponseFormat::StandardXml.parse_system(body).unwrap_err(),
        Error::NotSupportedByFormat { .. }
    ));
}

// ============================================================================
// Dispatch Tests
// ============================================================================

#[test]
fn test_dispatch_matches_concrete_parsers() {
    let parser = select("COMPACT").unwrap();
    assert_eq!(
        parser.parse_system(SYSTEM_REPLY.as_bytes()).unwrap(),
        CompactParser.parse_system(SYSTEM_REPLY.as_bytes()).unwrap()
    );

    let parser = select("STANDARD-XML").unwrap();
    assert_eq!(
        parser.parse_search(STANDARD_SEARCH.as_bytes()).unwrap(),
        StandardXmlParser
            .parse_search(STANDARD_SEARCH.as_bytes())
            .unwrap()
    );
}

#[test]
fn test_parsers_as_trait_objects() {
    let parsers: Vec<Box<dyn ResponseParser>> = vec![
        Box::new(CompactParser::new()) as Box<dyn ResponseParser>,
        Box::new(StandardXmlParser::new()) as Box<dyn ResponseParser>,
    ];
    let formats: Vec<ResponseFormat> = parsers.iter().map(|p| p.format()).collect();
    assert_eq!(formats, ResponseFormat::ALL.to_vec());
}

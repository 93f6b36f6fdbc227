//! Envelope templating

use std::fmt::{self, Write};

use super::{METADATA_NS, SOAPENV_NS, escape_text};

/// Options sent inside `<met:DeployOptions>`
///
/// Only `check_only`, `test_level` and `run_tests` come from the caller;
/// the rest are fixed by the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOptions {
    pub allow_missing_files: bool,
    pub auto_update_package: bool,
    pub check_only: bool,
    pub ignore_warnings: bool,
    pub perform_retrieve: bool,
    pub purge_on_delete: bool,
    pub rollback_on_error: bool,
    pub test_level: String,
    pub run_tests: Vec<String>,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            allow_missing_files: false,
            auto_update_package: false,
            check_only: true,
            ignore_warnings: false,
            perform_retrieve: false,
            purge_on_delete: false,
            rollback_on_error: true,
            test_level: "NoTestRun".to_string(),
            run_tests: Vec::new(),
        }
    }
}

/// A metadata API call and its parameters
#[derive(Debug, Clone)]
pub enum Operation<'a> {
    Retrieve {
        api_version: &'a str,
        /// Inner XML of `<met:unpackaged>`, inserted without escaping
        unpackaged: &'a str,
    },
    CheckRetrieveStatus {
        async_process_id: &'a str,
        include_zip: bool,
    },
    Deploy {
        /// Base64 archive, inserted without escaping
        zip_file: &'a str,
        options: &'a DeployOptions,
    },
    CheckDeployStatus {
        async_process_id: &'a str,
        include_details: bool,
    },
}

impl Operation<'_> {
    /// Element name of the call inside `<soapenv:Body>`
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Retrieve { .. } => "retrieve",
            Operation::CheckRetrieveStatus { .. } => "checkRetrieveStatus",
            Operation::Deploy { .. } => "deploy",
            Operation::CheckDeployStatus { .. } => "checkDeployStatus",
        }
    }

    /// Element name the remote wraps its reply in
    pub fn response_element(&self) -> &'static str {
        match self {
            Operation::Retrieve { .. } => "retrieveResponse",
            Operation::CheckRetrieveStatus { .. } => "checkRetrieveStatusResponse",
            Operation::Deploy { .. } => "deployResponse",
            Operation::CheckDeployStatus { .. } => "checkDeployStatusResponse",
        }
    }

    fn write_body(&self, out: &mut impl Write) -> fmt::Result {
        let name = self.name();
        writeln!(out, "      <met:{name}>")?;
        match self {
            Operation::Retrieve {
                api_version,
                unpackaged,
            } => {
                writeln!(out, "         <met:retrieveRequest>")?;
                element(out, 12, "apiVersion", &escape_text(api_version))?;
                writeln!(out, "            <met:unpackaged>{unpackaged}</met:unpackaged>")?;
                writeln!(out, "         </met:retrieveRequest>")?;
            }
            Operation::CheckRetrieveStatus {
                async_process_id,
                include_zip,
            } => {
                element(out, 9, "asyncProcessId", &escape_text(async_process_id))?;
                element(out, 9, "includeZip", bool_text(*include_zip))?;
            }
            Operation::Deploy { zip_file, options } => {
                element(out, 9, "zipFile", zip_file)?;
                writeln!(out, "         <met:DeployOptions>")?;
                element(out, 12, "allowMissingFiles", bool_text(options.allow_missing_files))?;
                element(out, 12, "autoUpdatePackage", bool_text(options.auto_update_package))?;
                element(out, 12, "checkOnly", bool_text(options.check_only))?;
                element(out, 12, "ignoreWarnings", bool_text(options.ignore_warnings))?;
                element(out, 12, "performRetrieve", bool_text(options.perform_retrieve))?;
                element(out, 12, "purgeOnDelete", bool_text(options.purge_on_delete))?;
                element(out, 12, "rollbackOnError", bool_text(options.rollback_on_error))?;
                element(out, 12, "testLevel", &escape_text(&options.test_level))?;
                for test in &options.run_tests {
                    element(out, 12, "runTests", &escape_text(test))?;
                }
                writeln!(out, "         </met:DeployOptions>")?;
            }
            Operation::CheckDeployStatus {
                async_process_id,
                include_details,
            } => {
                element(out, 9, "asyncProcessId", &escape_text(async_process_id))?;
                element(out, 9, "includeDetails", bool_text(*include_details))?;
            }
        }
        writeln!(out, "      </met:{name}>")
    }
}

/// A complete SOAP request: session header plus one operation
///
/// ```
/// use metarelay_core::envelope::{Envelope, Operation};
///
/// let body = Envelope::new(
///     "00D!session",
///     Operation::CheckRetrieveStatus {
///         async_process_id: "09S000000000001",
///         include_zip: true,
///     },
/// )
/// .render();
///
/// assert!(body.contains("<met:asyncProcessId>09S000000000001</met:asyncProcessId>"));
/// ```
#[derive(Debug, Clone)]
pub struct Envelope<'a> {
    session_id: &'a str,
    operation: Operation<'a>,
}

impl<'a> Envelope<'a> {
    pub fn new(session_id: &'a str, operation: Operation<'a>) -> Self {
        Self {
            session_id,
            operation,
        }
    }

    pub fn operation(&self) -> &Operation<'a> {
        &self.operation
    }

    /// Render the envelope as the request body
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Envelope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
        writeln!(
            f,
            r#"<soapenv:Envelope xmlns:soapenv="{SOAPENV_NS}" xmlns:met="{METADATA_NS}">"#
        )?;
        writeln!(f, "   <soapenv:Header>")?;
        writeln!(f, "      <met:SessionHeader>")?;
        element(f, 9, "sessionId", &escape_text(self.session_id))?;
        writeln!(f, "      </met:SessionHeader>")?;
        writeln!(f, "   </soapenv:Header>")?;
        writeln!(f, "   <soapenv:Body>")?;
        self.operation.write_body(f)?;
        writeln!(f, "   </soapenv:Body>")?;
        write!(f, "</soapenv:Envelope>")
    }
}

fn element(out: &mut impl Write, indent: usize, name: &str, text: &str) -> fmt::Result {
    writeln!(out, "{:indent$}<met:{name}>{text}</met:{name}>", "")
}

fn bool_text(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_retrieve_status_envelope() {
        let body = Envelope::new(
            "00D!session",
            Operation::CheckRetrieveStatus {
                async_process_id: "09S000000000001",
                include_zip: false,
            },
        )
        .render();

        let expected = r#"<?xml version="1.0" encoding="utf-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:met="http://soap.sforce.com/2006/04/metadata">
   <soapenv:Header>
      <met:SessionHeader>
         <met:sessionId>00D!session</met:sessionId>
      </met:SessionHeader>
   </soapenv:Header>
   <soapenv:Body>
      <met:checkRetrieveStatus>
         <met:asyncProcessId>09S000000000001</met:asyncProcessId>
         <met:includeZip>false</met:includeZip>
      </met:checkRetrieveStatus>
   </soapenv:Body>
</soapenv:Envelope>"#;

        assert_eq!(body, expected);
    }

    #[test]
    fn test_retrieve_inserts_unpackaged_verbatim() {
        let unpackaged = "<types><members>*</members><name>ApexClass</name></types>";
        let body = Envelope::new(
            "token",
            Operation::Retrieve {
                api_version: "58.0",
                unpackaged,
            },
        )
        .render();

        assert!(body.contains("<met:apiVersion>58.0</met:apiVersion>"));
        assert!(body.contains(&format!("<met:unpackaged>{unpackaged}</met:unpackaged>")));
        assert!(body.contains("<met:retrieve>"));
        assert!(body.contains("</met:retrieveRequest>"));
    }

    #[test]
    fn test_deploy_options_and_tests() {
        let options = DeployOptions {
            check_only: false,
            test_level: "RunSpecifiedTests".to_string(),
            run_tests: vec!["AccountTest".to_string(), "ContactTest".to_string()],
            ..DeployOptions::default()
        };
        let body = Envelope::new(
            "token",
            Operation::Deploy {
                zip_file: "UEsDBA==",
                options: &options,
            },
        )
        .render();

        assert!(body.contains("<met:zipFile>UEsDBA==</met:zipFile>"));
        assert!(body.contains("<met:checkOnly>false</met:checkOnly>"));
        assert!(body.contains("<met:rollbackOnError>true</met:rollbackOnError>"));
        assert!(body.contains("<met:testLevel>RunSpecifiedTests</met:testLevel>"));

        let first = body.find("<met:runTests>AccountTest</met:runTests>").unwrap();
        let second = body.find("<met:runTests>ContactTest</met:runTests>").unwrap();
        assert!(first < second);
        assert!(second < body.find("</met:DeployOptions>").unwrap());
    }

    #[test]
    fn test_session_id_is_escaped() {
        let body = Envelope::new(
            "a<b&c",
            Operation::CheckDeployStatus {
                async_process_id: "0Af000000000001",
                include_details: true,
            },
        )
        .render();

        assert!(body.contains("<met:sessionId>a&lt;b&amp;c</met:sessionId>"));
        assert!(body.contains("<met:includeDetails>true</met:includeDetails>"));
    }

    #[test]
    fn test_rendered_envelope_is_well_formed() {
        let options = DeployOptions::default();
        let operations = [
            Operation::Retrieve {
                api_version: "58.0",
                unpackaged: "<types><name>ApexClass</name></types>",
            },
            Operation::CheckRetrieveStatus {
                async_process_id: "1",
                include_zip: true,
            },
            Operation::Deploy {
                zip_file: "UEsDBA==",
                options: &options,
            },
            Operation::CheckDeployStatus {
                async_process_id: "1",
                include_details: false,
            },
        ];

        for operation in operations {
            let name = operation.name();
            let body = Envelope::new("token", operation).render();
            let doc = roxmltree::Document::parse(&body).unwrap();
            let call = doc
                .descendants()
                .find(|n| n.has_tag_name((METADATA_NS, name)))
                .unwrap();
            assert_eq!(call.parent().unwrap().tag_name().name(), "Body");
        }
    }
}

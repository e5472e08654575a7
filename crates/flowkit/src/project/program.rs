// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    address::Address,
    error::{Error, Result},
    path,
    project::parser::{
        self, CompositeKind, Declaration, ImportDeclaration, ImportLocation, ParsedProgram,
    },
};
use serde_json::Value;

/// Source code of a contract, script or transaction together with its parsed
/// imports.
///
/// Rewrites happen in place and reparse the code, so the import list always
/// matches the current code.
#[derive(Clone, Debug)]
pub struct Program {
    code: String,
    args: Vec<Value>,
    location: String,
    parsed: ParsedProgram,
    /// The code with every address import turned back into `import "Name"`
    code_with_unprocessed_imports: String,
}

impl Program {
    pub fn parse(code: &[u8], args: Vec<Value>, location: impl Into<String>) -> Result<Self> {
        let location = location.into();
        let code = String::from_utf8(code.to_vec())
            .map_err(|err| Error::parse(&location, err.to_string()))?;
        let parsed = parser::parse(&code).map_err(|message| Error::parse(&location, message))?;

        let mut program = Program {
            code_with_unprocessed_imports: String::new(),
            code,
            args,
            location,
            parsed,
        };
        program.convert_address_imports();
        Ok(program)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn code_with_unprocessed_imports(&self) -> &str {
        &self.code_with_unprocessed_imports
    }

    pub fn import_declarations(&self) -> &[ImportDeclaration] {
        &self.parsed.imports
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.parsed.declarations
    }

    /// Name of the single contract or contract interface the code declares
    pub fn name(&self) -> Result<String> {
        let declarations = &self.parsed.declarations;
        if declarations.len() > 1 {
            return Err(Error::parse(
                &self.location,
                "the code must declare exactly one contract or contract interface",
            ));
        }
        declarations
            .iter()
            .find(|declaration| declaration.kind == CompositeKind::Contract)
            .map(|declaration| declaration.name.clone())
            .ok_or_else(|| Error::parse(&self.location, "unable to determine contract name"))
    }

    /// Locations of all unresolved imports, `import "Foo"` and
    /// `import Foo from "./Foo.cdc"`, in source order
    pub fn import_statements(&self) -> Vec<&str> {
        self.parsed
            .imports
            .iter()
            .filter_map(|import| match &import.location {
                ImportLocation::String(location) => Some(location.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_imports(&self) -> bool {
        !self.import_statements().is_empty()
    }

    /// Imports of the form `import Foo from 0x01`
    pub fn address_import_declarations(&self) -> Vec<&ImportDeclaration> {
        self.parsed
            .imports
            .iter()
            .filter(|import| {
                matches!(import.location, ImportLocation::Address(_)) && !import.identifiers.is_empty()
            })
            .collect()
    }

    pub fn has_address_imports(&self) -> bool {
        !self.address_import_declarations().is_empty()
    }

    /// Rewrites every import of `from` into an import from `address`.
    ///
    /// When `canonical` differs from the import's own name the import keeps its name
    /// as a local alias of the canonical contract: `import Canonical as Name from 0x..`.
    pub fn replace_import(
        &mut self,
        from: &str,
        address: Address,
        canonical: Option<&str>,
    ) -> Result<()> {
        let import_name = path::import_name(from);
        let canonical = canonical.filter(|canonical| *canonical != import_name);
        let address = address.to_hex_literal();

        let replacements: Vec<_> = self
            .parsed
            .imports
            .iter()
            .filter(|import| matches!(&import.location, ImportLocation::String(location) if location == from))
            .map(|import| {
                let identifiers = match (canonical, import.identifiers.as_slice()) {
                    (Some(canonical), []) => format!("{} as {}", canonical, import_name),
                    (Some(canonical), [single]) if single.alias.is_none() => {
                        format!("{} as {}", canonical, single.name)
                    },
                    (_, []) => import_name.to_string(),
                    (_, identifiers) => join_identifiers(identifiers),
                };
                (
                    import.span.clone(),
                    format!("import {} from {}", identifiers, address),
                )
            })
            .collect();

        if replacements.is_empty() {
            return Ok(());
        }
        self.apply(replacements)
    }

    /// Recomputes the code with address imports turned back into bare imports,
    /// `import Foo from 0x01` into `import "Foo"` and `import Foo as Bar from 0x01`
    /// into `import "Bar"`.
    pub fn convert_address_imports(&mut self) {
        let replacements = self
            .parsed
            .imports
            .iter()
            .filter(|import| matches!(import.location, ImportLocation::Address(_)))
            .map(|import| (import.span.clone(), bare_imports(import)))
            .collect();
        self.code_with_unprocessed_imports = splice(&self.code, replacements);
    }

    /// Rewrites the code itself so that address imports become bare imports
    pub fn convert_imports(&mut self) -> Result<()> {
        self.code = self.code_with_unprocessed_imports.clone();
        self.reload()
    }

    /// The code with every address and path import written as a bare import, the
    /// form used while developing against local contracts
    pub fn development_code(&self) -> String {
        let replacements = self
            .parsed
            .imports
            .iter()
            .filter_map(|import| match &import.location {
                ImportLocation::Address(_) => Some((import.span.clone(), bare_imports(import))),
                ImportLocation::String(location) if !import.identifiers.is_empty() => {
                    let name = match import.identifiers.as_slice() {
                        [single] => single.local_name().to_string(),
                        _ => path::import_name(location).to_string(),
                    };
                    Some((import.span.clone(), format!("import \"{}\"", name)))
                },
                _ => None,
            })
            .collect();
        splice(&self.code, replacements)
    }

    fn apply(&mut self, replacements: Vec<(std::ops::Range<usize>, String)>) -> Result<()> {
        self.code = splice(&self.code, replacements);
        self.reload()
    }

    fn reload(&mut self) -> Result<()> {
        self.parsed =
            parser::parse(&self.code).map_err(|message| Error::parse(&self.location, message))?;
        self.convert_address_imports();
        Ok(())
    }
}

fn join_identifiers(identifiers: &[parser::ImportedIdentifier]) -> String {
    identifiers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn bare_imports(import: &ImportDeclaration) -> String {
    import
        .identifiers
        .iter()
        .map(|identifier| format!("import \"{}\"", identifier.local_name()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replaces non overlapping byte ranges of `code`
fn splice(code: &str, mut replacements: Vec<(std::ops::Range<usize>, String)>) -> String {
    replacements.sort_by_key(|(span, _)| span.start);
    let mut output = String::with_capacity(code.len());
    let mut cursor = 0;
    for (span, replacement) in replacements {
        output.push_str(&code[cursor..span.start]);
        output.push_str(&replacement);
        cursor = span.end;
    }
    output.push_str(&code[cursor..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok};

    fn program(code: &str) -> Program {
        Program::parse(code.as_bytes(), Vec::new(), "./scripts/test.cdc").unwrap()
    }

    #[test]
    fn test_name() {
        let contract = program("access(all) contract Foo { access(all) resource R {} }");
        assert_eq!(contract.name().unwrap(), "Foo");

        let interface = program("access(all) contract interface IFoo {}");
        assert_eq!(interface.name().unwrap(), "IFoo");

        let script = program("access(all) fun main() {}");
        assert_eq!(
            script.name().unwrap_err().to_string(),
            "failed to parse ./scripts/test.cdc: unable to determine contract name"
        );

        let two = program("access(all) contract A {}\naccess(all) contract B {}");
        assert!(two
            .name()
            .unwrap_err()
            .to_string()
            .contains("the code must declare exactly one contract or contract interface"));

        let resource = program("access(all) resource R {}");
        assert_err!(resource.name());
    }

    #[test]
    fn test_import_statements() {
        let program = program(
            r#"
            import "Foo"
            import Bar from "./Bar.cdc"
            import Baz from 0x01
            import Crypto
            access(all) fun main() {}
            "#,
        );
        assert_eq!(program.import_statements(), vec!["Foo", "./Bar.cdc"]);
        assert!(program.has_imports());
        assert!(program.has_address_imports());
        assert_eq!(program.address_import_declarations().len(), 1);
        assert_eq!(program.address_import_declarations()[0].identifiers[0].name, "Baz");
    }

    #[test]
    fn test_replace_import() {
        let mut program = program(
            "import \"FUSD\"\nimport \"FUSD1\"\nimport Kibble from \"./Kibble.cdc\"\naccess(all) fun main() {}",
        );
        let one = Address::from_hex("0x1").unwrap();
        let two = Address::from_hex("0x2").unwrap();
        let three = Address::from_hex("0x3").unwrap();

        assert_ok!(program.replace_import("FUSD", one, Some("FUSD")));
        assert_ok!(program.replace_import("FUSD1", two, Some("FUSD")));
        assert_ok!(program.replace_import("./Kibble.cdc", three, None));

        assert_eq!(
            program.code(),
            "import FUSD from 0x0000000000000001\n\
             import FUSD as FUSD1 from 0x0000000000000002\n\
             import Kibble from 0x0000000000000003\n\
             access(all) fun main() {}"
        );
        assert!(!program.has_imports());
        assert_eq!(program.address_import_declarations().len(), 3);
        assert_eq!(
            program.code_with_unprocessed_imports(),
            "import \"FUSD\"\nimport \"FUSD1\"\nimport \"Kibble\"\naccess(all) fun main() {}"
        );
    }

    #[test]
    fn test_replace_path_import_with_canonical() {
        let mut program = program("import FUSD2 from \"../contracts/FUSD2.cdc\"\naccess(all) fun main() {}");
        let address = Address::from_hex("0x2").unwrap();
        assert_ok!(program.replace_import("../contracts/FUSD2.cdc", address, Some("FUSD")));
        assert_eq!(
            program.code(),
            "import FUSD as FUSD2 from 0x0000000000000002\naccess(all) fun main() {}"
        );
    }

    #[test]
    fn test_replace_unknown_import_is_noop() {
        let code = "import \"Foo\"\naccess(all) fun main() {}";
        let mut program = program(code);
        assert_ok!(program.replace_import("Bar", Address::ZERO, None));
        assert_eq!(program.code(), code);
    }

    #[test]
    fn test_convert_imports() {
        let mut program = program(
            "import Foo from 0xf8d6e0586b0a20c7\nimport FUSD as FUSD1 from 0x01\nimport Crypto\naccess(all) contract Bar {}",
        );
        assert_ok!(program.convert_imports());
        assert_eq!(
            program.code(),
            "import \"Foo\"\nimport \"FUSD1\"\nimport Crypto\naccess(all) contract Bar {}"
        );
        assert_eq!(program.import_statements(), vec!["Foo", "FUSD1"]);
        assert!(!program.has_address_imports());
    }

    #[test]
    fn test_development_code() {
        let program = program(
            "import Foo from \"./Foo.cdc\"\nimport Bar from 0x01\nimport \"Baz\"\naccess(all) fun main() {}",
        );
        assert_eq!(
            program.development_code(),
            "import \"Foo\"\nimport \"Bar\"\nimport \"Baz\"\naccess(all) fun main() {}"
        );
    }

    #[test]
    fn test_parse_errors_carry_location() {
        let err = Program::parse(b"access(all) contract Foo {", Vec::new(), "Foo.cdc").unwrap_err();
        assert!(matches!(err, Error::Parse { ref location, .. } if location == "Foo.cdc"));
    }
}

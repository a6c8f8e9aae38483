// Entry-point detection over raw source text
//
// Three independent signals: CLI (shebang or a CLI-parser call), web service
// (framework bootstrap, plus best-effort port and routes) and program (the
// language's main idiom). Any one of them makes the file an entry point.

use super::EntryPointDetector;
use crate::profile::LanguageId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Cli,
    WebService,
    Program,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Cli => "cli",
            EntryKind::WebService => "web_service",
            EntryKind::Program => "program",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub method: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebServiceInfo {
    pub framework: String,
    pub port: Option<u16>,
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPointInfo {
    pub is_entry_point: bool,
    pub kinds: Vec<EntryKind>,
    pub has_shebang: bool,
    /// CLI framework whose invocation was found
    pub cli_framework: Option<String>,
    pub web: Option<WebServiceInfo>,
}

impl EntryPointInfo {
    pub fn is(&self, kind: EntryKind) -> bool {
        self.kinds.contains(&kind)
    }
}

fn compile(table: &[(&'static str, &str)]) -> Vec<(&'static str, Regex)> {
    table
        .iter()
        .map(|(name, pattern)| (*name, Regex::new(pattern).expect("static pattern")))
        .collect()
}

static CLI_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    compile(&[
        ("argparse", r"argparse\.ArgumentParser\s*\("),
        ("click", r"@click\.(command|group)\b"),
        ("typer", r"typer\.Typer\s*\("),
        ("commander", r#"(require\(\s*['"]commander['"]\s*\)|from\s+['"]commander['"])"#),
        ("yargs", r#"(require\(\s*['"]yargs(/[\w/]+)?['"]\s*\)|from\s+['"]yargs(/[\w/]+)?['"])"#),
        ("clap", r"(#\[derive\([^)]*\bParser\b|clap::(Parser|Command|App)\b)"),
        ("cobra", r"cobra\.Command\s*\{"),
        ("flag", r"\bflag\.Parse\(\)"),
        ("picocli", r"(\bpicocli\.|@Command\s*\()"),
        ("process.argv", r"\bprocess\.argv\b"),
        ("sys.argv", r"\bsys\.argv\b"),
    ])
});

static WEB_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    compile(&[
        ("express", r#"(require\(\s*['"]express['"]\s*\)|from\s+['"]express['"])"#),
        ("koa", r#"(new\s+Koa\s*\(|require\(\s*['"]koa['"]\s*\))"#),
        ("fastify", r#"(require\(\s*['"]fastify['"]\s*\)|from\s+['"]fastify['"])"#),
        ("node-http", r"\bhttp\.createServer\s*\("),
        ("flask", r"\bFlask\s*\(\s*__name__"),
        ("fastapi", r"\bFastAPI\s*\("),
        ("django", r"\burlpatterns\s*="),
        ("spring", r"@(SpringBootApplication|RestController)\b"),
        ("gin", r"\bgin\.(Default|New)\s*\("),
        ("echo", r"\becho\.New\s*\("),
        ("net/http", r"\bhttp\.ListenAndServe(TLS)?\s*\("),
        ("actix", r"\bHttpServer::new\b"),
        ("axum", r"\baxum::"),
        ("rocket", r"(#\[launch\]|\brocket::build\s*\()"),
        ("aspnet", r"\bWebApplication\.CreateBuilder\s*\("),
    ])
});

static PORT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\.listen\(\s*(\d{2,5})\b",
        r"(?i)\bport\s*[=:]\s*(\d{2,5})\b",
        r#"['"](?:[\w.]*|\[::\]):(\d{2,5})['"]"#,
        r"(?i)\bport\s*=\s*\w+\s*(?:\|\||\bor\b)\s*(\d{2,5})\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

/// `app.get("/users", ...)`, `r.POST("/x")`, `@router.delete("/x")`
static ROUTE_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b\w+\.(get|post|put|delete|patch)\(\s*['"](/[^'"]*)['"]"#).expect("static pattern")
});

/// Flask `@app.route("/x")`
static ROUTE_DECORATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\.route\(\s*['"](/[^'"]*)['"]"#).expect("static pattern"));

/// Spring `@GetMapping("/x")`
static ROUTE_MAPPING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"@(Get|Post|Put|Delete|Patch|Request)Mapping\(\s*(?:(?:value|path)\s*=\s*)?"(/[^"]*)""#)
        .expect("static pattern")
});

static MAIN_PATTERNS: Lazy<Vec<(LanguageId, Regex)>> = Lazy::new(|| {
    [
        (LanguageId::Python, r#"(?m)^if\s+__name__\s*==\s*['"]__main__['"]\s*:"#),
        (LanguageId::Go, r"(?ms)^package\s+main\b.*^func\s+main\s*\(\s*\)"),
        (LanguageId::Rust, r"(?m)^\s*(pub\s+)?(async\s+)?fn\s+main\s*\(\s*\)"),
        (LanguageId::Java, r"\bstatic\s+void\s+main\s*\(\s*String"),
        (LanguageId::CSharp, r"\bstatic\s+(async\s+)?(void|int|Task(<int>)?)\s+Main\s*\("),
        (LanguageId::C, r"(?m)^\s*int\s+main\s*\("),
        (LanguageId::Cpp, r"(?m)^\s*int\s+main\s*\("),
        (LanguageId::JavaScript, r"\brequire\.main\s*===?\s*module\b"),
        (LanguageId::TypeScript, r"\brequire\.main\s*===?\s*module\b"),
        (LanguageId::Ruby, r"\bif\s+__FILE__\s*==\s*\$0"),
    ]
    .into_iter()
    .map(|(id, p)| (id, Regex::new(p).expect("static pattern")))
    .collect()
});

/// The regex-based default detector
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternEntryPointDetector;

impl EntryPointDetector for PatternEntryPointDetector {
    fn detect(&self, source: &str, language: LanguageId) -> EntryPointInfo {
        let mut info = EntryPointInfo {
            has_shebang: source.starts_with("#!"),
            cli_framework: first_match(&CLI_PATTERNS, source),
            ..EntryPointInfo::default()
        };

        if info.has_shebang || info.cli_framework.is_some() {
            info.kinds.push(EntryKind::Cli);
        }
        if let Some(web) = web_service(source) {
            info.kinds.push(EntryKind::WebService);
            info.web = Some(web);
        }
        if has_main(source, language) {
            info.kinds.push(EntryKind::Program);
        }

        info.is_entry_point = !info.kinds.is_empty();
        info
    }
}

fn first_match(patterns: &[(&'static str, Regex)], source: &str) -> Option<String> {
    patterns
        .iter()
        .find(|(_, re)| re.is_match(source))
        .map(|(name, _)| name.to_string())
}

fn web_service(source: &str) -> Option<WebServiceInfo> {
    let framework = first_match(&WEB_PATTERNS, source)?;
    Some(WebServiceInfo {
        framework,
        port: detect_port(source),
        routes: detect_routes(source),
    })
}

/// First plausible listening port
pub fn detect_port(source: &str) -> Option<u16> {
    PORT_PATTERNS.iter().find_map(|re| {
        re.captures_iter(source)
            .find_map(|c| c.get(1).and_then(|m| m.as_str().parse::<u16>().ok()))
            .filter(|p| *p > 0)
    })
}

/// Route declarations in source order, duplicates dropped
pub fn detect_routes(source: &str) -> Vec<Route> {
    let mut found: Vec<(usize, Route)> = Vec::new();

    for c in ROUTE_CALL.captures_iter(source) {
        if let (Some(all), Some(method), Some(path)) = (c.get(0), c.get(1), c.get(2)) {
            found.push((all.start(), route(method.as_str(), path.as_str())));
        }
    }
    for c in ROUTE_DECORATOR.captures_iter(source) {
        if let (Some(all), Some(path)) = (c.get(0), c.get(1)) {
            found.push((all.start(), route("ANY", path.as_str())));
        }
    }
    for c in ROUTE_MAPPING.captures_iter(source) {
        if let (Some(all), Some(verb), Some(path)) = (c.get(0), c.get(1), c.get(2)) {
            let method = if verb.as_str() == "Request" { "ANY" } else { verb.as_str() };
            found.push((all.start(), route(method, path.as_str())));
        }
    }

    found.sort_by_key(|(offset, _)| *offset);
    let mut routes: Vec<Route> = Vec::new();
    for (_, r) in found {
        if !routes.contains(&r) {
            routes.push(r);
        }
    }
    routes
}

fn route(method: &str, path: &str) -> Route {
    Route {
        method: method.to_uppercase(),
        path: path.to_string(),
    }
}

fn has_main(source: &str, language: LanguageId) -> bool {
    MAIN_PATTERNS
        .iter()
        .filter(|(id, _)| language == LanguageId::Unknown || *id == language)
        .any(|(_, re)| re.is_match(source))
}

use lexer::Variant;
use log::LevelFilter;

pub const USAGE: &str = "\
Usage: glslcheck [OPTIONS] [FILES...]

Checks shader sources, reading stdin if no files are given.

Options:
    --variant <VERSION>[es]  Language version, like 330 or 300es.
                             Detected from #version by default
    --outline                Print the top level declarations
    --no-builtins            Don't load the builtin functions and variables
    -v, -vv                  More logging
    -q                       Don't print anything
    -h, --help               Print this message";

pub struct Config {
    pub files: Vec<String>,
    pub variant: Option<Variant>,
    pub outline: bool,
    pub builtins: bool,
    pub verbose: u8,
    pub quiet: bool,
    pub help: bool,
}

impl Config {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut conf = Self {
            files: Vec::new(),
            variant: None,
            outline: false,
            builtins: true,
            verbose: 0,
            quiet: false,
            help: false,
        };
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--variant" => {
                    let Some(version) = args.next() else {
                        return Err("Missing argument for '--variant'".to_string());
                    };
                    conf.variant = Some(parse_variant(&version)?);
                }
                "--outline" => conf.outline = true,
                "--no-builtins" => conf.builtins = false,
                "-v" => conf.verbose += 1,
                "-vv" => conf.verbose += 2,
                "-q" => conf.quiet = true,
                "-h" | "--help" => conf.help = true,
                opt if opt.starts_with('-') && opt != "-" => {
                    return Err(format!("Unknown option '{opt}'"));
                }
                _ => conf.files.push(arg),
            }
        }
        Ok(conf)
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// `330`, `300es` or `300 es`
fn parse_variant(s: &str) -> Result<Variant, String> {
    let s = s.trim();
    let (version, es) = match s.strip_suffix("es") {
        Some(version) => (version.trim_end(), true),
        None => (s, false),
    };
    let version = version
        .parse()
        .map_err(|_| format!("Invalid version '{s}'"))?;
    Ok(Variant::for_version(version, es))
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, String> {
        Config::parse(args.iter().map(ToString::to_string))
    }

    #[test]
    fn options() {
        let conf = parse(&["--outline", "-vv", "a.frag", "--no-builtins", "b.vert"]).unwrap();
        assert!(conf.outline);
        assert!(!conf.builtins);
        assert_eq!(conf.files, ["a.frag", "b.vert"]);
        assert_eq!(conf.log_level(), LevelFilter::Debug);
        assert_eq!(conf.variant, None);
    }

    #[test]
    fn variants() {
        let conf = parse(&["--variant", "300es"]).unwrap();
        assert_eq!(conf.variant, Some(Variant::for_version(300, true)));
        let conf = parse(&["--variant", "330"]).unwrap();
        assert_eq!(conf.variant, Some(Variant::for_version(330, false)));

        assert!(parse(&["--variant"]).is_err());
        assert!(parse(&["--variant", "latest"]).is_err());
    }

    #[test]
    fn unknown_option() {
        assert_eq!(parse(&["--emit"]).err().unwrap(), "Unknown option '--emit'");
        let conf = parse(&["-q", "-v"]).unwrap();
        assert_eq!(conf.log_level(), LevelFilter::Error);
    }
}

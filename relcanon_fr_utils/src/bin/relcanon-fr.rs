//! French lemmatization and relation canonicalization over CoNLL-X files.
//!
//! Reads tokens with their POS tags and a `chunk` feature, repairs the chunk
//! tags, fills the lemma column and, for sentences whose relation tokens are
//! marked with a `rel` feature, adds `rel_lemma` and `rel_canon` features to
//! the first relation token.
use std::fs::File;
use std::io::BufWriter;
use std::time::{Duration, Instant};

use clap::{App, AppSettings, Arg, ArgMatches};
use conllx::{Features, ReadSentence, WriteSentence};
use stdinout::OrExit;

use relcanon_fr::error::LemmaError;
use relcanon_fr::{
    format_lemmatized_relation, AnnotatedSentence, Canonicalizer, Config, DictionaryFormat,
    LazyLemmatizer, LemmaFeatures, Lemmatizer, RelationSpan,
};

static DEFAULT_CLAP_SETTINGS: &[AppSettings] = &[
    AppSettings::DontCollapseArgsInUsage,
    AppSettings::UnifiedHelpMessage,
];

const CHUNK_FEATURE: &str = "chunk";
const RELATION_FEATURE: &str = "rel";
const RELATION_LEMMA_FEATURE: &str = "rel_lemma";
const RELATION_CANON_FEATURE: &str = "rel_canon";

fn main() {
    env_logger::init();
    let parsed = args();

    let mut config = Config::from_path(parsed.value_of("CONFIG").unwrap())
        .or_exit("Cannot read the configuration", 1);
    if let Some(dictionary) = parsed.value_of("DICTIONARY") {
        config.dictionary = Some(dictionary.into());
    }
    if parsed.is_present("BINARY") {
        config.dictionary_format = DictionaryFormat::Binary;
    }

    let canonicalizer = config.canonicalizer();
    let lemmatizer = LazyLemmatizer::new(config);
    let lemmatizer = lemmatizer
        .get()
        .or_exit("Cannot load the lemma dictionary", 1);

    if let Some(path) = parsed.value_of("WRITE_CACHE") {
        let file = File::create(path).or_exit("Cannot create the dictionary cache", 1);
        lemmatizer
            .dictionary()
            .write_binary(BufWriter::new(file))
            .or_exit("Writing the dictionary cache failed", 1);
        log::info!("Wrote dictionary cache to {}", path);
    }

    let input = stdinout::Input::from(parsed.value_of("INPUT"));
    let mut reader = conllx::Reader::new(input.buf_read().or_exit("Cannot open input file", 1));
    let output = stdinout::Output::from(parsed.value_of("OUTPUT"));

    let writer = conllx::Writer::new(output.write().or_exit("Couldn't find output", 1));

    let cache_size = parse_usize_arg(&parsed, "CACHE_SIZE");
    let force = parsed.is_present("FORCE");
    let verbose = match output {
        stdinout::Output::File(_) => parsed.is_present("VERBOSE"),
        _ => false,
    };

    let mut processor = Processor::new(lemmatizer, canonicalizer, writer, cache_size, force);

    let pb = indicatif::ProgressBar::new_spinner();
    pb.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("Time: {elapsed_precise} ::: {msg}")
            .or_exit("Invalid progress template", 1),
    );

    if verbose {
        pb.enable_steady_tick(Duration::from_millis(200));
    }

    let time = Instant::now();
    let mut total = Stats::default();
    while let Some(sentence) = reader
        .read_sentence()
        .or_exit("Failed reading sentence!", 1)
    {
        let stats = processor
            .process_sentence(sentence)
            .or_exit("Lemmatization failed", 1);
        total.add(&stats);

        if verbose && total.processed_tokens > 0 {
            pb.set_message(format!(
                "Processed: {:?} ::: cached: {:?} ::: relations: {:?} ::: avg. time/token: {:?}",
                total.processed_tokens,
                total.cached_tokens,
                total.relations,
                time.elapsed() / total.processed_tokens as u32,
            ));
        }
    }

    pb.finish_and_clear();
    log::info!(
        "Processed {} tokens, {} relations in {:?}",
        total.processed_tokens,
        total.relations,
        time.elapsed()
    );
}

// Struct to pass on metrics of a processed sentence.
#[derive(Debug, Default)]
struct Stats {
    processed_tokens: usize,
    cached_tokens: usize,
    relations: usize,
}

impl Stats {
    fn add(&mut self, other: &Stats) {
        self.processed_tokens += other.processed_tokens;
        self.cached_tokens += other.cached_tokens;
        self.relations += other.relations;
    }
}

// Brings together lemmatizer, canonicalizer and lemma cache for sentence-wise
// processing.
struct Processor<'a, W>
where
    W: WriteSentence,
{
    lemmatizer: &'a Lemmatizer,
    canonicalizer: Canonicalizer,
    writer: W,
    cache: lru_cache::LruCache<(String, String), String>,
    force: bool,
}

impl<'a, W> Processor<'a, W>
where
    W: WriteSentence,
{
    fn new(
        lemmatizer: &'a Lemmatizer,
        canonicalizer: Canonicalizer,
        writer: W,
        cache_size: usize,
        force: bool,
    ) -> Self {
        Processor {
            lemmatizer,
            canonicalizer,
            writer,
            cache: lru_cache::LruCache::new(cache_size),
            force,
        }
    }

    fn process_sentence(
        &mut self,
        mut tokens: Vec<conllx::Token>,
    ) -> Result<Stats, relcanon_fr::Error> {
        let mut stats = Stats::default();
        let mut features: Vec<Vec<(String, Option<String>)>> =
            tokens.iter().map(parse_features).collect();

        let mut forms = Vec::with_capacity(tokens.len());
        let mut pos_tags = Vec::with_capacity(tokens.len());
        let mut chunk_tags = Vec::with_capacity(tokens.len());
        for (token, token_features) in tokens.iter().zip(&features) {
            let pos = LemmaFeatures::pos(token).ok_or_else(|| {
                LemmaError::InvalidArgument(format!("'{}' has no POS tag", token.form()))
            })?;
            forms.push(token.form().to_owned());
            pos_tags.push(pos.to_owned());
            chunk_tags.push(
                feature_value(token_features, CHUNK_FEATURE)
                    .unwrap_or("O")
                    .to_owned(),
            );
        }

        let mut lemmas = Vec::with_capacity(tokens.len());
        for (token, (form, pos)) in tokens.iter().zip(forms.iter().zip(&pos_tags)) {
            // force means overwrite lemmas in input tokens with a non-empty lemma
            if let (false, Some(lemma)) = (self.force, token.lemma()) {
                lemmas.push(lemma.to_lowercase());
                continue;
            }

            let key = (form.clone(), pos.clone());
            let lemma = match self.cache.get_mut(&key) {
                // cache hit -> we got lucky
                Some(lemma) => {
                    stats.cached_tokens += 1;
                    lemma.clone()
                }
                None => {
                    let lemma = self.lemmatizer.resolve(form, pos)?;
                    self.cache.insert(key, lemma.clone());
                    lemma
                }
            };
            lemmas.push(lemma);
        }

        let mut sentence =
            AnnotatedSentence::new(forms, pos_tags, chunk_tags)?.with_lemmas(lemmas)?;
        sentence.normalize_chunks();

        if log::log_enabled!(log::Level::Debug) {
            for line in &sentence.format_aligned() {
                log::debug!("{}", line);
            }
        }

        if let Some(span) = relation_span(&features) {
            let lemmatized = format_lemmatized_relation(&sentence, span)?;
            let canon = self
                .canonicalizer
                .canonicalize(&mut sentence, span, self.lemmatizer)?;
            log::debug!("Relation: {} -> {}", lemmatized, canon);

            set_feature(&mut features[span.start], RELATION_LEMMA_FEATURE, lemmatized);
            set_feature(&mut features[span.start], RELATION_CANON_FEATURE, canon);
            stats.relations += 1;
        }

        let lemmas = sentence.lemmas().unwrap_or_default();
        for (i, token) in tokens.iter_mut().enumerate() {
            set_feature(&mut features[i], CHUNK_FEATURE, sentence.chunk_tags()[i].clone());
            token.set_features(Some(Features::from_string(format_features(&features[i]))));
            if let Some(lemma) = lemmas.get(i) {
                token.set_lemma(Some(lemma.as_str()));
            }
        }

        self.writer
            .write_sentence(&tokens)
            .or_exit("Writing to the output failed!", 1);

        stats.processed_tokens = tokens.len();
        Ok(stats)
    }
}

// The relation is the contiguous run of tokens with the `rel` feature.
fn relation_span(features: &[Vec<(String, Option<String>)>]) -> Option<RelationSpan> {
    let marked: Vec<usize> = features
        .iter()
        .enumerate()
        .filter(|(_, f)| f.iter().any(|(key, _)| key == RELATION_FEATURE))
        .map(|(i, _)| i)
        .collect();

    let (&start, &last) = (marked.first()?, marked.last()?);
    if last - start + 1 != marked.len() {
        log::warn!("Relation tokens are not contiguous, skipping: {:?}", marked);
        return None;
    }

    Some(RelationSpan::new(start, marked.len()))
}

fn parse_features(token: &conllx::Token) -> Vec<(String, Option<String>)> {
    let features = match token.features() {
        Some(features) => features.as_str(),
        None => return Vec::new(),
    };

    features
        .split('|')
        .filter(|f| !f.is_empty() && *f != "_")
        .map(|f| match f.find(':') {
            Some(idx) => (f[..idx].to_owned(), Some(f[idx + 1..].to_owned())),
            None => (f.to_owned(), None),
        })
        .collect()
}

fn feature_value<'a>(features: &'a [(String, Option<String>)], key: &str) -> Option<&'a str> {
    features
        .iter()
        .find(|(k, _)| k == key)
        .and_then(|(_, v)| v.as_deref())
}

fn set_feature(features: &mut Vec<(String, Option<String>)>, key: &str, value: String) {
    match features.iter_mut().find(|(k, _)| k == key) {
        Some((_, v)) => *v = Some(value),
        None => features.push((key.to_owned(), Some(value))),
    }
}

fn format_features(features: &[(String, Option<String>)]) -> String {
    features
        .iter()
        .map(|(k, v)| match v {
            Some(v) => format!("{}:{}", k, v),
            None => k.clone(),
        })
        .collect::<Vec<_>>()
        .join("|")
}

fn parse_usize_arg(args: &ArgMatches, name: &str) -> usize {
    args.value_of(name)
        .unwrap()
        .parse::<usize>()
        .or_exit(format!("{} not a positive integer!", name), 1)
}

fn args() -> ArgMatches<'static> {
    App::new("relcanon-fr")
        .settings(DEFAULT_CLAP_SETTINGS)
        .arg(
            Arg::with_name("CONFIG")
                .help("Configuration in toml format.")
                .long_help(
                    "The configuration names the lemma dictionary and can override the \
                     stop words, the verbs conjugated with être and the POS tag map.",
                )
                .index(1)
                .required(true),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("Input file in conll-x format. If not provided input reads from stdin.")
                .long("input")
                .long_help(
                    "The input file contains the input in conll-x format. Chunk tags are read \
                     from the 'chunk' feature, relation tokens are marked with the 'rel' \
                     feature. If no input file is provided the input is read from stdin.",
                )
                .index(2)
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Output File. If not provided output writes to stdout.")
                .long("output")
                .short("o")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("DICTIONARY")
                .help("Lemma dictionary, overrides the configuration.")
                .long("dictionary")
                .short("d")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("BINARY")
                .help("The dictionary is a binary cache.")
                .long_help("Read the dictionary in the binary format written by --write_cache.")
                .long("binary")
                .required(false),
        )
        .arg(
            Arg::with_name("WRITE_CACHE")
                .help("Writes the loaded dictionary as a binary cache.")
                .long("write_cache")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("CACHE_SIZE")
                .help("Cache size.")
                .short("c")
                .long("cache_size")
                .long_help(
                    "Defines the size of the LRU-cache of lemmas by form and POS tag. \
                     Size of 0 deactivates the cache.",
                )
                .takes_value(true)
                .required(false)
                .default_value("100000"),
        )
        .arg(
            Arg::with_name("VERBOSE")
                .help("Prints run metrics. Only available if '-o' is specified.")
                .long("verbose")
                .long_help(
                    "Prints throughput measures and elapsed time to stderr. Can only be used \
                     if an output file is specified using '-o'.",
                )
                .short("v")
                .requires("OUTPUT")
                .required(false),
        )
        .arg(
            Arg::with_name("FORCE")
                .help("Writes lemmas for tokens that already have lemma.")
                .long_help(
                    "By default tokens with an entry in the lemma column keep their lemma. \
                     This enables preprocessing using dictionary lookups for closed class words etc.",
                )
                .long("force")
                .short("f")
                .required(false),
        )
        .get_matches()
}

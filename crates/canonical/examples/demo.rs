use canonical::{expand, normalize, singularize, tokenize, Lexicon, SnowballStemmer, Stem};

fn main() {
    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Varillas de acero corrugado 3/8\" para construcción".to_string());

    let lexicon = Lexicon::spanish();
    let stemmer = SnowballStemmer::spanish();

    let tokens = normalize(&text, &lexicon);
    let stems: Vec<String> = tokens.iter().map(|token| stemmer.stem(token)).collect();

    println!("input:       {text}");
    println!("singular:    {}", singularize(&text, &lexicon));
    println!("folded:      {:?}", tokenize(&text));
    println!("normalized:  {tokens:?}");
    println!("stems:       {stems:?}");
    println!();
    println!("variants:    {:?}", expand(&text, &lexicon));
}

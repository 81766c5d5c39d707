error_chain! {
    foreign_links {
        Clap(::clap::Error);
        Http(::hyper::http::Error);
        Hyper(::hyper::Error);
        Io(::std::io::Error);
        Json(::serde_json::Error);
        Url(::url::ParseError);
        Yaml(::serde_yaml::Error);
    }

    errors {
        Usage(msg: String) {
            description("invalid usage")
            display("{}", msg)
        }

        RuleFileParse(field: String, value: String) {
            description("malformed rule file")
            display("invalid value for {}: {:?} is not an integer", field, value)
        }

        Editor(msg: String) {
            description("editor failed")
            display("{}", msg)
        }

        Api(status: u16, msg: String) {
            description("remote service rejected the request")
            display("remote service returned {}: {}", status, msg)
        }

        Config(msg: String) {
            description("incomplete configuration")
            display("{}", msg)
        }
    }
}

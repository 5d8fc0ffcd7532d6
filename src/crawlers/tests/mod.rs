mod crawl_scenarios;
